pub mod auth;
pub mod users;

pub use auth::{LoginRequest, LogoutRequest, RegisterRequest, TokenResponse, UserProfileResponse};
pub use users::ListUsersQuery;
