// Library exports for the binary and the integration tests

pub mod app;
pub mod dto;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod routes;
