//! Request/response bodies for subscription endpoints.

use serde::{Deserialize, Serialize};

/// Query string the browser relays after checkout.
///
/// Missing parameters arrive as empty strings and fail validation in the
/// handler, so the caller gets the standard error body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentVerificationParams {
    #[serde(default)]
    pub razorpay_signature: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_subscription_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub subscription_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayKeyResponse {
    pub success: bool,
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub success: bool,
    pub refunded: bool,
    pub refund_failed: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
