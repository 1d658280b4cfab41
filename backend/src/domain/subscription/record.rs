//! Subscription sub-record embedded in a user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

use super::{SubscriptionError, SubscriptionStatus};

/// `{id, status}` pair stored on the user.
///
/// `id` is the gateway's subscription identifier. It is present exactly
/// while the status is `Created`, `Active` or `Cancelled`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: Option<String>,
    pub status: SubscriptionStatus,
}

impl SubscriptionRecord {
    /// Rebuilds a record from storage.
    pub fn reconstitute(id: Option<String>, status: SubscriptionStatus) -> Self {
        Self { id, status }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Attaches a freshly created gateway subscription.
    pub fn begin(&mut self, gateway_subscription_id: impl Into<String>) -> Result<(), SubscriptionError> {
        if let Some(existing) = &self.id {
            return Err(SubscriptionError::already_subscribed(existing.clone()));
        }
        let gateway_subscription_id = gateway_subscription_id.into();
        if gateway_subscription_id.trim().is_empty() {
            return Err(SubscriptionError::validation(
                "subscription_id",
                "gateway returned an empty subscription id",
            ));
        }
        self.transition(SubscriptionStatus::Created, "create")?;
        self.id = Some(gateway_subscription_id);
        Ok(())
    }

    /// Marks the subscription paid.
    pub fn activate(&mut self) -> Result<(), SubscriptionError> {
        self.transition(SubscriptionStatus::Active, "activate")
    }

    /// Moves an active subscription to `Cancelled` and returns its id.
    pub fn cancel(&mut self) -> Result<String, SubscriptionError> {
        let id = self
            .id
            .clone()
            .ok_or_else(|| SubscriptionError::invalid_state(self.status.as_str(), "cancel"))?;
        self.transition(SubscriptionStatus::Cancelled, "cancel")?;
        Ok(id)
    }

    /// Drops a cancelled subscription so a new cycle can start.
    pub fn clear(&mut self) -> Result<(), SubscriptionError> {
        if self.status != SubscriptionStatus::Cancelled {
            return Err(SubscriptionError::invalid_state(self.status.as_str(), "clear"));
        }
        self.transition(SubscriptionStatus::None, "clear")?;
        self.id = None;
        Ok(())
    }

    /// Drops a checkout that was never paid and returns its id.
    pub fn abandon(&mut self) -> Result<String, SubscriptionError> {
        if self.status != SubscriptionStatus::Created {
            return Err(SubscriptionError::invalid_state(self.status.as_str(), "abandon"));
        }
        let id = self
            .id
            .take()
            .ok_or_else(|| SubscriptionError::invalid_state(self.status.as_str(), "abandon"))?;
        self.status = SubscriptionStatus::None;
        Ok(id)
    }

    fn transition(
        &mut self,
        target: SubscriptionStatus,
        attempted: &str,
    ) -> Result<(), SubscriptionError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| SubscriptionError::invalid_state(self.status.as_str(), attempted))?;
        Ok(())
    }
}
