//! Authentication route handlers
//!
//! - Registration
//! - Login
//! - Logout

pub mod login;
pub mod logout;
pub mod register;
