//! Subscription handlers.
//!
//! ## Commands
//! - Create a gateway subscription
//! - Verify a signed payment callback and activate
//! - Cancel, refunding inside the refund window
//!
//! ## Queries
//! - Public gateway key

mod cancel_subscription;
mod create_subscription;
mod gateway_call;
mod get_gateway_key;
mod settings;
mod verify_payment;

#[cfg(test)]
mod test_fixture;

pub use cancel_subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CancelSubscriptionResult, RefundOutcome,
};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
};
pub use get_gateway_key::{GetGatewayKeyHandler, GetGatewayKeyResult};
pub use settings::BillingSettings;
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
