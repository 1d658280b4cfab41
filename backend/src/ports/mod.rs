//! Ports - Interfaces between the domain and the outside world.
//!
//! Application handlers depend only on these traits; adapters implement them.

mod clock;
mod event_publisher;
mod event_subscriber;
mod password_hasher;
mod payment_gateway;
mod payment_repository;
mod session_validator;
mod stats_repository;
mod user_repository;

pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use password_hasher::PasswordHasher;
pub use payment_gateway::{
    CreateSubscriptionRequest, GatewayRefund, GatewaySubscription, PaymentGateway,
    PaymentGatewayError, PaymentGatewayErrorCode,
};
pub use payment_repository::PaymentRepository;
pub use session_validator::{SessionValidator, TokenIssuer};
pub use stats_repository::StatsRepository;
pub use user_repository::UserRepository;
