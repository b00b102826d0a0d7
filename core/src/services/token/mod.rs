//! Token module for JWT handling
//!
//! This module handles all token-related operations including:
//! - HS256 token issuance and verification
//! - Unverified claim extraction for logout
//! - Background purge of expired revocation entries

mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, RevocationCleanupConfig, RevocationCleanupService};
pub use config::{TokenCodecConfig, MIN_SECRET_BYTES};
pub use service::TokenCodec;
