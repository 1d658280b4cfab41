//! Scriptable `PaymentGateway` for tests.
//!
//! Supports:
//! - Preset subscription ids
//! - Per-method error injection
//! - An artificial delay to exercise caller timeouts
//! - Call tracking

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{
    CreateSubscriptionRequest, GatewayRefund, GatewaySubscription, PaymentGateway,
    PaymentGatewayError,
};

/// Recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub method: &'static str,
    pub arg: String,
}

#[derive(Default)]
struct MockState {
    next_subscription_ids: VecDeque<String>,
    issued: u32,
    method_errors: HashMap<&'static str, PaymentGatewayError>,
    delay: Option<Duration>,
    call_log: Vec<GatewayCall>,
}

/// In-process gateway double.
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.push_subscription_id("sub_test_1");
/// gateway.set_method_error("refund_payment", PaymentGatewayError::network("reset"));
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    // === Configuration ===

    /// Queues the id returned by the next `create_subscription`.
    /// Without one, ids are generated as `sub_mock_<n>`.
    pub fn push_subscription_id(&self, id: impl Into<String>) {
        self.state().next_subscription_ids.push_back(id.into());
    }

    /// Fails every call to `method` until cleared.
    pub fn set_method_error(&self, method: &'static str, error: PaymentGatewayError) {
        self.state().method_errors.insert(method, error);
    }

    pub fn clear_errors(&self) {
        self.state().method_errors.clear();
    }

    /// Sleeps before answering. Used to drive caller timeouts.
    pub fn set_delay(&self, delay: Duration) {
        self.state().delay = Some(delay);
    }

    // === Call tracking ===

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Records the call, then applies the configured delay and error.
    async fn enter(&self, method: &'static str, arg: String) -> Result<(), PaymentGatewayError> {
        let (delay, error) = {
            let mut state = self.state();
            state.call_log.push(GatewayCall { method, arg });
            (state.delay, state.method_errors.get(method).cloned())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<GatewaySubscription, PaymentGatewayError> {
        self.enter("create_subscription", request.plan_id.clone())
            .await?;

        let mut state = self.state();
        state.issued += 1;
        let id = match state.next_subscription_ids.pop_front() {
            Some(id) => id,
            None => format!("sub_mock_{}", state.issued),
        };

        Ok(GatewaySubscription {
            id,
            status: "created".to_string(),
        })
    }

    async fn cancel_subscription(&self, subscription_id: &str) -> Result<(), PaymentGatewayError> {
        self.enter("cancel_subscription", subscription_id.to_string())
            .await
    }

    async fn refund_payment(&self, payment_id: &str) -> Result<GatewayRefund, PaymentGatewayError> {
        self.enter("refund_payment", payment_id.to_string()).await?;

        Ok(GatewayRefund {
            id: format!("rfnd_{}", payment_id),
            payment_id: payment_id.to_string(),
        })
    }
}
