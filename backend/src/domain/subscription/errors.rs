//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | ForbiddenRole | 400 |
//! | SignatureMismatch | 400 |
//! | UserNotFound / NoSubscription / PaymentNotFound | 404 |
//! | AlreadySubscribed | 409 |
//! | InvalidState | 409 |
//! | Gateway | 502 |
//! | GatewayTimeout | 504 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised by the subscription lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Malformed or missing input.
    ValidationFailed { field: String, message: String },

    UserNotFound(UserId),

    /// User holds no subscription id.
    NoSubscription(UserId),

    /// No verified payment recorded for the gateway subscription.
    PaymentNotFound(String),

    /// Admins never hold subscriptions.
    ForbiddenRole,

    /// User already holds a subscription id.
    AlreadySubscribed(String),

    InvalidState { current: String, attempted: String },

    /// Callback signature did not verify. Never activates anything.
    SignatureMismatch,

    /// Gateway rejected the call or could not be reached.
    Gateway { message: String, retryable: bool },

    /// Gateway call exceeded its deadline.
    GatewayTimeout { operation: String, after_secs: u64 },

    Infrastructure(String),
}

impl SubscriptionError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found(user_id: UserId) -> Self {
        SubscriptionError::UserNotFound(user_id)
    }

    pub fn no_subscription(user_id: UserId) -> Self {
        SubscriptionError::NoSubscription(user_id)
    }

    pub fn payment_not_found(subscription_id: impl Into<String>) -> Self {
        SubscriptionError::PaymentNotFound(subscription_id.into())
    }

    pub fn already_subscribed(subscription_id: impl Into<String>) -> Self {
        SubscriptionError::AlreadySubscribed(subscription_id.into())
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        SubscriptionError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn gateway(message: impl Into<String>, retryable: bool) -> Self {
        SubscriptionError::Gateway {
            message: message.into(),
            retryable,
        }
    }

    pub fn gateway_timeout(operation: impl Into<String>, after_secs: u64) -> Self {
        SubscriptionError::GatewayTimeout {
            operation: operation.into(),
            after_secs,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::UserNotFound(_) => ErrorCode::UserNotFound,
            SubscriptionError::NoSubscription(_) => ErrorCode::NotFound,
            SubscriptionError::PaymentNotFound(_) => ErrorCode::PaymentNotFound,
            SubscriptionError::ForbiddenRole => ErrorCode::ForbiddenRole,
            SubscriptionError::AlreadySubscribed(_) => ErrorCode::AlreadySubscribed,
            SubscriptionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SubscriptionError::SignatureMismatch => ErrorCode::SignatureMismatch,
            SubscriptionError::Gateway { .. } => ErrorCode::GatewayError,
            SubscriptionError::GatewayTimeout { .. } => ErrorCode::GatewayTimeout,
            SubscriptionError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubscriptionError::UserNotFound(id) => format!("User not found: {}", id),
            SubscriptionError::NoSubscription(_) => "No subscription found".to_string(),
            SubscriptionError::PaymentNotFound(sub_id) => {
                format!("No payment found for subscription {}", sub_id)
            }
            SubscriptionError::ForbiddenRole => {
                "Admin don't need to buy subscription".to_string()
            }
            SubscriptionError::AlreadySubscribed(sub_id) => {
                format!("Already subscribed ({})", sub_id)
            }
            SubscriptionError::InvalidState { current, attempted } => {
                format!("Cannot {} subscription in {} state", attempted, current)
            }
            SubscriptionError::SignatureMismatch => "Payment signature mismatch".to_string(),
            SubscriptionError::Gateway { message, .. } => {
                format!("Payment gateway error: {}", message)
            }
            SubscriptionError::GatewayTimeout {
                operation,
                after_secs,
            } => format!(
                "Payment gateway did not answer {} within {}s",
                operation, after_secs
            ),
            SubscriptionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Whether the caller may retry. Retries are left to the caller; the
    /// service never retries gateway calls on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubscriptionError::Gateway { retryable, .. } => *retryable,
            SubscriptionError::GatewayTimeout { .. } | SubscriptionError::Infrastructure(_) => {
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SubscriptionError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for SubscriptionError {
    fn from(err: ValidationError) -> Self {
        SubscriptionError::validation(err.field().to_string(), err.to_string())
    }
}
