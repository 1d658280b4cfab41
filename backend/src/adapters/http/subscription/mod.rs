//! HTTP adapter for subscription billing.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::subscription_routes;
