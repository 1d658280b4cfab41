//! Payment configuration (Razorpay)

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// Razorpay credentials and billing parameters
#[derive(Clone, Deserialize)]
pub struct PaymentConfig {
    /// Public key id, also handed to the browser checkout
    pub key_id: String,

    /// API secret; signs payment callbacks
    pub key_secret: String,

    #[serde(default = "default_plan_id")]
    pub plan_id: String,

    /// Days after payment during which cancellation refunds in full
    #[serde(default = "default_refund_days")]
    pub refund_days: u32,

    /// Override for the gateway base URL (tests, sandboxes)
    pub api_base_url: Option<String>,

    #[serde(default = "default_gateway_timeout")]
    pub gateway_timeout_secs: u64,

    /// Billing cycles requested per subscription
    #[serde(default = "default_billing_cycles")]
    pub billing_cycles: u32,
}

impl PaymentConfig {
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_ID"));
        }
        if self.key_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_SECRET"));
        }
        if !self.key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }
        if self.plan_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PLAN_ID"));
        }
        if !(1..=365).contains(&self.refund_days) {
            return Err(ValidationError::InvalidRefundWindow);
        }
        if !(1..=120).contains(&self.gateway_timeout_secs) {
            return Err(ValidationError::InvalidGatewayTimeout);
        }
        if self.billing_cycles == 0 {
            return Err(ValidationError::InvalidBillingCycles);
        }
        Ok(())
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("plan_id", &self.plan_id)
            .field("refund_days", &self.refund_days)
            .field("api_base_url", &self.api_base_url)
            .field("gateway_timeout_secs", &self.gateway_timeout_secs)
            .field("billing_cycles", &self.billing_cycles)
            .finish()
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: String::new(),
            plan_id: default_plan_id(),
            refund_days: default_refund_days(),
            api_base_url: None,
            gateway_timeout_secs: default_gateway_timeout(),
            billing_cycles: default_billing_cycles(),
        }
    }
}

fn default_plan_id() -> String {
    "plan_LZmxOgOLbCbAPW".to_string()
}

fn default_refund_days() -> u32 {
    7
}

fn default_gateway_timeout() -> u64 {
    10
}

fn default_billing_cycles() -> u32 {
    12
}
