//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod password;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, Authenticator, PasswordAuthenticator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use token::{
    CleanupResult, RevocationCleanupConfig, RevocationCleanupService, TokenCodec,
    TokenCodecConfig,
};
pub use user::UserService;
