//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - JWT sessions, Argon2 hashing
//! - `clock` - System and fixed clocks
//! - `events` - In-process event bus
//! - `http` - axum routes and handlers
//! - `memory` - In-memory repositories
//! - `postgres` - sqlx repositories
//! - `razorpay` - Payment gateway client and mock

pub mod auth;
pub mod clock;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;

pub use clock::{FixedClock, SystemClock};
pub use events::InMemoryEventBus;
