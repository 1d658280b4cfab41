//! Verified payment record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PaymentId, Timestamp};

/// Immutable record of a verified gateway payment.
///
/// Only created after the callback signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub gateway_payment_id: String,
    pub gateway_subscription_id: String,
    pub signature: String,
    pub created_at: Timestamp,
}

impl Payment {
    pub fn record(
        gateway_payment_id: impl Into<String>,
        gateway_subscription_id: impl Into<String>,
        signature: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            gateway_payment_id: gateway_payment_id.into(),
            gateway_subscription_id: gateway_subscription_id.into(),
            signature: signature.into(),
            created_at,
        }
    }
}
