//! # Gatekeeper Core
//!
//! Core business logic and domain layer for the Gatekeeper backend.
//! This crate contains domain entities, the token codec, authentication
//! services, repository interfaces and error types.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
