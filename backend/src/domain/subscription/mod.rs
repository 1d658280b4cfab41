//! Subscription domain module.
//!
//! Subscription lifecycle embedded in the user record, verified payments,
//! refund eligibility and gateway callback signature checks.
//!
//! # Module Structure
//!
//! - `status` - SubscriptionStatus state machine
//! - `record` - SubscriptionRecord embedded in a User
//! - `payment` - Verified Payment record
//! - `refund` - Refund window policy
//! - `signature` - Gateway callback signature verification
//! - `errors` - SubscriptionError taxonomy
//! - `events` - Subscription lifecycle events

mod errors;
mod events;
mod payment;
mod record;
mod refund;
mod signature;
mod status;

pub use errors::SubscriptionError;
pub use events::{SubscriptionActivated, SubscriptionCancelled, SubscriptionCreated};
pub use payment::Payment;
pub use record::SubscriptionRecord;
pub use refund::RefundWindow;
pub use signature::PaymentSignatureVerifier;
pub use status::SubscriptionStatus;
