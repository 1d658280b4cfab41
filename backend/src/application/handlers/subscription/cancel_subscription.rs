//! CancelSubscriptionHandler - cancels at the gateway, refunding inside the window.

use std::sync::Arc;

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::subscription::{
    Payment, SubscriptionCancelled, SubscriptionError, SubscriptionStatus,
};
use crate::domain::user::User;
use crate::ports::{Clock, EventPublisher, PaymentGateway, PaymentRepository, UserRepository};

use super::gateway_call::with_deadline;
use super::BillingSettings;
use crate::application::handlers::publish::publish_or_warn;

#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub user_id: UserId,
}

/// What happened to the payment when the subscription ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundOutcome {
    Refunded,
    OutsideWindow,
    /// Inside the window, but the gateway refused or timed out. The
    /// subscription is cancelled regardless and the refund is settled by hand.
    Failed,
    /// Checkout was never paid.
    Unpaid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelSubscriptionResult {
    pub subscription_id: String,
    pub refund: RefundOutcome,
    pub refund_days: u32,
}

impl CancelSubscriptionResult {
    pub fn refunded(&self) -> bool {
        self.refund == RefundOutcome::Refunded
    }

    pub fn refund_failed(&self) -> bool {
        self.refund == RefundOutcome::Failed
    }

    pub fn message(&self) -> String {
        match self.refund {
            RefundOutcome::Refunded => format!(
                "Subscription cancelled, You will receive full refund within {} days.",
                self.refund_days
            ),
            RefundOutcome::OutsideWindow => format!(
                "Subscription cancelled, No refund initiated as subscription was cancelled after {} days.",
                self.refund_days
            ),
            RefundOutcome::Failed => {
                "Subscription cancelled, but the refund could not be initiated. Please contact support."
                    .to_string()
            }
            RefundOutcome::Unpaid => "Subscription cancelled.".to_string(),
        }
    }
}

/// Cancels the user's subscription.
///
/// Paid: gateway cancel, optional refund, payment removal, user reset.
/// Unpaid checkout: gateway cancel, user reset.
/// A failed gateway cancel aborts before any local write. Once the gateway
/// has cancelled, the local cancellation always completes; a failed refund
/// is reported in the result.
pub struct CancelSubscriptionHandler {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    settings: BillingSettings,
}

impl CancelSubscriptionHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        settings: BillingSettings,
    ) -> Self {
        Self {
            users,
            payments,
            gateway,
            events,
            clock,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelSubscriptionCommand,
    ) -> Result<CancelSubscriptionResult, SubscriptionError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| SubscriptionError::user_not_found(cmd.user_id))?;

        let subscription_id = user
            .subscription
            .id
            .clone()
            .ok_or_else(|| SubscriptionError::no_subscription(user.id))?;

        let payment = self
            .payments
            .find_by_subscription_id(&subscription_id)
            .await?;

        match (user.subscription.status, payment) {
            (SubscriptionStatus::Active, Some(payment)) => {
                self.cancel_paid(user, subscription_id, payment).await
            }
            (SubscriptionStatus::Active, None) => {
                Err(SubscriptionError::payment_not_found(subscription_id))
            }
            (SubscriptionStatus::Created, None) => self.abandon(user, subscription_id).await,
            // A stored payment on an unactivated checkout means the callback
            // has to be replayed first.
            (status, _) => Err(SubscriptionError::invalid_state(status.as_str(), "cancel")),
        }
    }

    async fn cancel_paid(
        &self,
        mut user: User,
        subscription_id: String,
        payment: Payment,
    ) -> Result<CancelSubscriptionResult, SubscriptionError> {
        let limit = self.settings.gateway_timeout;
        with_deadline(
            "cancel_subscription",
            limit,
            self.gateway.cancel_subscription(&subscription_id),
        )
        .await?;

        let now = self.clock.now();
        let refund = if self
            .settings
            .refund_window
            .is_refundable(&payment.created_at, &now)
        {
            match with_deadline(
                "refund_payment",
                limit,
                self.gateway.refund_payment(&payment.gateway_payment_id),
            )
            .await
            {
                Ok(refund) => {
                    tracing::info!(refund_id = %refund.id, payment_id = %refund.payment_id, "payment refunded");
                    RefundOutcome::Refunded
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        user_id = %user.id,
                        subscription_id = %subscription_id,
                        payment_id = %payment.gateway_payment_id,
                        "subscription cancelled at gateway but refund failed; refund must be issued manually"
                    );
                    RefundOutcome::Failed
                }
            }
        } else {
            RefundOutcome::OutsideWindow
        };

        self.payments.delete(&payment.id).await?;
        user.end_subscription()?;
        self.users.save(&user).await?;

        Ok(self.finish(&user, subscription_id, refund, now).await)
    }

    async fn abandon(
        &self,
        mut user: User,
        subscription_id: String,
    ) -> Result<CancelSubscriptionResult, SubscriptionError> {
        with_deadline(
            "cancel_subscription",
            self.settings.gateway_timeout,
            self.gateway.cancel_subscription(&subscription_id),
        )
        .await?;

        user.abandon_subscription()?;
        self.users.save(&user).await?;

        let now = self.clock.now();
        Ok(self
            .finish(&user, subscription_id, RefundOutcome::Unpaid, now)
            .await)
    }

    async fn finish(
        &self,
        user: &User,
        subscription_id: String,
        refund: RefundOutcome,
        now: Timestamp,
    ) -> CancelSubscriptionResult {
        let result = CancelSubscriptionResult {
            subscription_id,
            refund,
            refund_days: self.settings.refund_window.length_in_days(),
        };

        tracing::info!(
            user_id = %user.id,
            subscription_id = %result.subscription_id,
            refund = ?refund,
            "subscription cancelled"
        );

        let event = SubscriptionCancelled {
            event_id: EventId::new(),
            user_id: user.id,
            subscription_id: result.subscription_id.clone(),
            refunded: result.refunded(),
            cancelled_at: now,
        };
        publish_or_warn(self.events.as_ref(), &event, &user.id).await;

        result
    }
}
