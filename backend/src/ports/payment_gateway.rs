//! Payment gateway port - external subscription/payment processor.
//!
//! The gateway creates and cancels recurring subscriptions and refunds
//! captured payments. Browser checkout happens on the gateway's side; the
//! signed redirect that follows is verified in the domain, not here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::subscription::SubscriptionError;

/// Port for the external payment processor.
///
/// No method retries on its own. Creating or refunding twice would be a
/// duplicate billing action.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<GatewaySubscription, PaymentGatewayError>;

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), PaymentGatewayError>;

    async fn refund_payment(&self, payment_id: &str) -> Result<GatewayRefund, PaymentGatewayError>;
}

// ════════════════════════════════════════════════════════════════════════════════
// Request / Response Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub plan_id: String,
    /// Number of billing cycles.
    pub total_count: u32,
    /// Let the gateway email the customer.
    pub customer_notify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySubscription {
    pub id: String,
    /// Gateway-reported status, e.g. "created".
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRefund {
    pub id: String,
    pub payment_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentGatewayErrorCode {
    NetworkError,
    AuthenticationError,
    BadRequest,
    NotFound,
    RateLimited,
    ProviderError,
    InvalidResponse,
}

impl PaymentGatewayErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::RateLimited | Self::ProviderError
        )
    }
}

impl std::fmt::Display for PaymentGatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NetworkError => "network_error",
            Self::AuthenticationError => "authentication_error",
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ProviderError => "provider_error",
            Self::InvalidResponse => "invalid_response",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentGatewayError {
    pub code: PaymentGatewayErrorCode,
    pub message: String,
    /// Gateway's own error code, when it sent one.
    pub provider_code: Option<String>,
    pub retryable: bool,
}

impl PaymentGatewayError {
    pub fn new(code: PaymentGatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentGatewayErrorCode::NetworkError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentGatewayErrorCode::InvalidResponse, message)
    }

    /// Classifies an HTTP error status from the gateway.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            400 | 422 => PaymentGatewayErrorCode::BadRequest,
            401 | 403 => PaymentGatewayErrorCode::AuthenticationError,
            404 => PaymentGatewayErrorCode::NotFound,
            429 => PaymentGatewayErrorCode::RateLimited,
            _ => PaymentGatewayErrorCode::ProviderError,
        };
        Self::new(code, message)
    }
}

impl std::fmt::Display for PaymentGatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentGatewayError {}

impl From<PaymentGatewayError> for SubscriptionError {
    fn from(err: PaymentGatewayError) -> Self {
        SubscriptionError::gateway(err.to_string(), err.retryable)
    }
}
