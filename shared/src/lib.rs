//! Shared utilities and common types for the Gatekeeper server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    PasswordConfig, PurgeConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
