//! Authentication service module
//!
//! This module provides the account-facing flows:
//! - Registration and login with email and password
//! - Logout by revoking the presented token
//! - Session checks combining revocation, signature, subject and expiry

mod authenticator;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use authenticator::{Authenticator, PasswordAuthenticator};
pub use config::AuthServiceConfig;
pub use service::AuthService;
