//! Billing parameters shared by the subscription handlers.

use std::time::Duration;

use crate::domain::subscription::RefundWindow;

#[derive(Debug, Clone)]
pub struct BillingSettings {
    pub plan_id: String,
    /// Billing cycles requested per subscription.
    pub billing_cycles: u32,
    pub refund_window: RefundWindow,
    /// Deadline for each individual gateway call.
    pub gateway_timeout: Duration,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            plan_id: "plan_LZmxOgOLbCbAPW".to_string(),
            billing_cycles: 12,
            refund_window: RefundWindow::days(7),
            gateway_timeout: Duration::from_secs(10),
        }
    }
}
