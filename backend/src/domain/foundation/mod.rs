//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, error vocabulary, event infrastructure and the
//! state machine contract used by the user, subscription and stats modules.

mod auth;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use crate::domain_event;
pub use auth::{AuthError, IssuedToken};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{PaymentId, StatsId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
