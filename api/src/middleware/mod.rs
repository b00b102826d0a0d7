pub mod auth;
pub mod cors;

pub use auth::{AuthContext, SessionAuthorizer, SessionGuard};
pub use cors::create_cors;
