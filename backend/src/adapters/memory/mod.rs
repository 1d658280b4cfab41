//! In-memory repositories.
//!
//! Back the server when no database is configured, and the tests.

mod payment_repository;
mod stats_repository;
mod user_repository;

pub use payment_repository::InMemoryPaymentRepository;
pub use stats_repository::InMemoryStatsRepository;
pub use user_repository::InMemoryUserRepository;
