//! CreateSubscriptionHandler - opens a gateway subscription for a user.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::subscription::{SubscriptionCreated, SubscriptionError};
use crate::ports::{Clock, CreateSubscriptionRequest, EventPublisher, PaymentGateway, UserRepository};

use super::gateway_call::with_deadline;
use super::BillingSettings;
use crate::application::handlers::publish::publish_or_warn;

#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubscriptionResult {
    /// Gateway subscription id the browser checkout is opened with.
    pub subscription_id: String,
}

/// Creates a subscription at the gateway and records it on the user in
/// `created` status.
///
/// Two concurrent calls for the same user can both pass the
/// "no subscription yet" check. There is no per-user lock.
pub struct CreateSubscriptionHandler {
    users: Arc<dyn UserRepository>,
    gateway: Arc<dyn PaymentGateway>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    settings: BillingSettings,
}

impl CreateSubscriptionHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        gateway: Arc<dyn PaymentGateway>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        settings: BillingSettings,
    ) -> Self {
        Self {
            users,
            gateway,
            events,
            clock,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, SubscriptionError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| SubscriptionError::user_not_found(cmd.user_id))?;

        if user.is_admin() {
            return Err(SubscriptionError::ForbiddenRole);
        }
        if let Some(existing) = &user.subscription.id {
            return Err(SubscriptionError::already_subscribed(existing.clone()));
        }

        let created = with_deadline(
            "create_subscription",
            self.settings.gateway_timeout,
            self.gateway.create_subscription(CreateSubscriptionRequest {
                plan_id: self.settings.plan_id.clone(),
                total_count: self.settings.billing_cycles,
                customer_notify: true,
            }),
        )
        .await?;

        if created.status != "created" {
            tracing::info!(
                subscription_id = %created.id,
                gateway_status = %created.status,
                "gateway reported unexpected status for new subscription"
            );
        }

        user.start_subscription(created.id.clone())?;
        if let Err(e) = self.users.save(&user).await {
            tracing::error!(
                user_id = %user.id,
                subscription_id = %created.id,
                error = %e,
                "gateway subscription created but user could not be saved"
            );
            return Err(e.into());
        }

        tracing::info!(user_id = %user.id, subscription_id = %created.id, "subscription created");

        let event = SubscriptionCreated {
            event_id: EventId::new(),
            user_id: user.id,
            subscription_id: created.id.clone(),
            plan_id: self.settings.plan_id.clone(),
            created_at: self.clock.now(),
        };
        publish_or_warn(self.events.as_ref(), &event, &user.id).await;

        Ok(CreateSubscriptionResult {
            subscription_id: created.id,
        })
    }
}
