//! Routes that require an active session

pub mod get;
pub mod list;
pub mod me;
