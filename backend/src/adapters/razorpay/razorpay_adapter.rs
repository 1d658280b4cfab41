//! Razorpay REST adapter.
//!
//! Implements `PaymentGateway` against the Razorpay v1 API with basic auth
//! (`key_id:key_secret`) and form-encoded bodies.
//!
//! ```ignore
//! let config = RazorpayConfig::new("rzp_test_abc", key_secret);
//! let gateway = RazorpayGateway::new(config)?;
//! let sub = gateway.create_subscription(request).await?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CreateSubscriptionRequest, GatewayRefund, GatewaySubscription, PaymentGateway,
    PaymentGatewayError,
};

pub const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";

/// Credentials and endpoint for the Razorpay API.
#[derive(Clone)]
pub struct RazorpayConfig {
    key_id: String,
    key_secret: SecretString,
    api_base_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Points the adapter at another host (sandbox proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.api_base_url, path)
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct RazorpaySubscription {
    id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayRefund {
    id: String,
    payment_id: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    error: RazorpayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetail {
    code: String,
    #[serde(default)]
    description: String,
}

/// `PaymentGateway` backed by Razorpay.
///
/// Timeouts are applied by the caller; this client does not retry.
#[derive(Debug, Clone)]
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn post_form<T>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PaymentGatewayError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http_client
            .post(self.config.url(path))
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .form(params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(operation, error = %e, "razorpay request failed");
                PaymentGatewayError::network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_from_body(operation, status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(operation, error = %e, "unreadable razorpay response");
            PaymentGatewayError::invalid_response(format!("Failed to parse Razorpay response: {}", e))
        })
    }

    fn error_from_body(operation: &'static str, status: u16, body: &str) -> PaymentGatewayError {
        match serde_json::from_str::<RazorpayErrorBody>(body) {
            Ok(parsed) => {
                tracing::warn!(
                    operation,
                    status,
                    provider_code = %parsed.error.code,
                    "razorpay rejected request"
                );
                PaymentGatewayError::from_status(
                    status,
                    format!("Razorpay API error: {}", parsed.error.description),
                )
                .with_provider_code(parsed.error.code)
            }
            Err(_) => {
                tracing::warn!(operation, status, "razorpay rejected request");
                PaymentGatewayError::from_status(status, format!("Razorpay API error: {}", body))
            }
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<GatewaySubscription, PaymentGatewayError> {
        let params = [
            ("plan_id", request.plan_id.clone()),
            ("total_count", request.total_count.to_string()),
            (
                "customer_notify",
                if request.customer_notify { "1" } else { "0" }.to_string(),
            ),
        ];

        let created: RazorpaySubscription = self
            .post_form("create_subscription", "subscriptions", &params)
            .await?;

        tracing::info!(
            subscription_id = %created.id,
            gateway_status = %created.status,
            plan_id = %request.plan_id,
            "razorpay subscription created"
        );

        Ok(GatewaySubscription {
            id: created.id,
            status: created.status,
        })
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), PaymentGatewayError> {
        let cancelled: RazorpaySubscription = self
            .post_form(
                "cancel_subscription",
                &format!("subscriptions/{}/cancel", subscription_id),
                &[("cancel_at_cycle_end", "0".to_string())],
            )
            .await?;

        tracing::info!(
            subscription_id = %cancelled.id,
            gateway_status = %cancelled.status,
            "razorpay subscription cancelled"
        );
        Ok(())
    }

    async fn refund_payment(&self, payment_id: &str) -> Result<GatewayRefund, PaymentGatewayError> {
        let refund: RazorpayRefund = self
            .post_form(
                "refund_payment",
                &format!("payments/{}/refund", payment_id),
                &[],
            )
            .await?;

        tracing::info!(refund_id = %refund.id, payment_id = %refund.payment_id, "razorpay refund issued");

        Ok(GatewayRefund {
            id: refund.id,
            payment_id: refund.payment_id,
        })
    }
}
