//! Domain entities representing core business objects.

pub mod token;
pub mod user;


// Re-export commonly used types
pub use token::{Claims, RevocationEntry, RESERVED_CLAIMS, ROLES_CLAIM};
pub use user::{Role, User};
