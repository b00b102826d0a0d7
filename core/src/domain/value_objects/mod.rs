//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod page;

pub use auth_response::{AuthResponse, LogoutResponse};
pub use page::{Page, PageRequest, SortDirection, UserSortField};
