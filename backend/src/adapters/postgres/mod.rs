//! PostgreSQL adapters.
//!
//! Schema lives in `backend/migrations`.

mod payment_repository;
mod stats_repository;
mod user_repository;

pub use payment_repository::PostgresPaymentRepository;
pub use stats_repository::PostgresStatsRepository;
pub use user_repository::PostgresUserRepository;
