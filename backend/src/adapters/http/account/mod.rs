//! HTTP adapter for accounts and sessions.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::account_routes;
