//! Subscription lifecycle events.
//!
//! Published after the corresponding user record change is persisted.
//! The stats updater recounts active subscriptions on activation and
//! cancellation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Timestamp, UserId};

/// A gateway subscription was created and attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCreated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub subscription_id: String,
    pub plan_id: String,
    pub created_at: Timestamp,
}

domain_event!(
    SubscriptionCreated,
    event_type = "subscription.created.v1",
    schema_version = 1,
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = created_at,
    event_id = event_id
);

/// A signed payment callback verified and the subscription went active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionActivated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub subscription_id: String,
    pub gateway_payment_id: String,
    pub activated_at: Timestamp,
}

domain_event!(
    SubscriptionActivated,
    event_type = "subscription.activated.v1",
    schema_version = 1,
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = activated_at,
    event_id = event_id
);

/// An active subscription was cancelled, with or without refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCancelled {
    pub event_id: EventId,
    pub user_id: UserId,
    pub subscription_id: String,
    pub refunded: bool,
    pub cancelled_at: Timestamp,
}

domain_event!(
    SubscriptionCancelled,
    event_type = "subscription.cancelled.v1",
    schema_version = 1,
    aggregate_id = user_id,
    aggregate_type = "User",
    occurred_at = cancelled_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn cancelled_event_envelope_carries_refund_flag() {
        let user_id = UserId::new();
        let event = SubscriptionCancelled {
            event_id: EventId::new(),
            user_id,
            subscription_id: "sub_1".to_string(),
            refunded: true,
            cancelled_at: Timestamp::now(),
        };

        let envelope = event.to_envelope().unwrap();

        assert_eq!(envelope.event_type, "subscription.cancelled.v1");
        assert_eq!(envelope.aggregate_id, user_id.to_string());
        assert_eq!(envelope.payload["refunded"], true);
    }
}
