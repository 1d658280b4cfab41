//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates domain operations over the ports. Command handlers write,
//! query handlers read; `AuthGuard` gates both.

mod guard;
pub mod handlers;

pub use guard::AuthGuard;
pub use handlers::*;
