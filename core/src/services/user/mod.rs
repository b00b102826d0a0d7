//! Read-only queries over the user directory

mod service;


pub use service::UserService;
