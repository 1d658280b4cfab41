//! Refund window policy.

use chrono::Duration;

use crate::domain::foundation::Timestamp;

/// Number of days after payment during which a cancellation is refunded.
///
/// The window is closed-open: a cancellation at exactly `days * 24h` after
/// payment is not refunded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundWindow {
    days: u32,
}

impl RefundWindow {
    pub fn days(days: u32) -> Self {
        Self { days }
    }

    pub fn length_in_days(&self) -> u32 {
        self.days
    }

    pub fn duration(&self) -> Duration {
        Duration::days(i64::from(self.days))
    }

    /// Returns true if cancelling at `now` a payment made at `paid_at`
    /// earns a refund.
    pub fn is_refundable(&self, paid_at: &Timestamp, now: &Timestamp) -> bool {
        now.duration_since(paid_at) < self.duration()
    }
}
