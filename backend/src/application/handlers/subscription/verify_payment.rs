//! VerifyPaymentHandler - activates a subscription from a signed callback.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::subscription::{
    Payment, PaymentSignatureVerifier, SubscriptionActivated, SubscriptionError,
};
use crate::domain::user::User;
use crate::ports::{Clock, EventPublisher, PaymentRepository, UserRepository};

use crate::application::handlers::publish::publish_or_warn;

/// Callback fields relayed by the browser after checkout.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub user_id: UserId,
    pub payment_id: String,
    pub subscription_id: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaymentResult {
    /// Gateway payment id, used as the success-page reference.
    pub payment_id: String,
    /// True when this payment had already been applied.
    pub replayed: bool,
}

/// Verifies the callback signature, records the payment and activates the
/// subscription.
///
/// The payment insert and the user update are separate writes. If the user
/// save fails, the payment is deleted again before the error is returned.
pub struct VerifyPaymentHandler {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentRepository>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    verifier: PaymentSignatureVerifier,
}

impl VerifyPaymentHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentRepository>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        verifier: PaymentSignatureVerifier,
    ) -> Self {
        Self {
            users,
            payments,
            events,
            clock,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, SubscriptionError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| SubscriptionError::user_not_found(cmd.user_id))?;

        if user.is_admin() {
            return Err(SubscriptionError::ForbiddenRole);
        }

        let stored_subscription_id = user
            .subscription
            .id
            .clone()
            .ok_or_else(|| SubscriptionError::no_subscription(user.id))?;

        if cmd.payment_id.trim().is_empty() {
            return Err(SubscriptionError::validation("payment_id", "is required"));
        }

        if cmd.subscription_id != stored_subscription_id {
            tracing::warn!(
                user_id = %user.id,
                "payment callback names a subscription the user does not hold"
            );
            return Err(SubscriptionError::SignatureMismatch);
        }

        if let Err(e) = self
            .verifier
            .verify(&cmd.payment_id, &stored_subscription_id, &cmd.signature)
        {
            tracing::warn!(user_id = %user.id, payment_id = %cmd.payment_id, "payment signature rejected");
            return Err(e);
        }

        let existing = self
            .payments
            .find_by_gateway_payment_id(&cmd.payment_id)
            .await?;

        match existing {
            Some(_) if user.subscription.is_active() => {
                tracing::info!(user_id = %user.id, payment_id = %cmd.payment_id, "payment already applied");
                Ok(VerifyPaymentResult {
                    payment_id: cmd.payment_id,
                    replayed: true,
                })
            }
            Some(_) => {
                // Payment made it to storage on an earlier attempt but the
                // user did not; finish the activation with it.
                self.activate(user, &stored_subscription_id, &cmd.payment_id)
                    .await?;
                Ok(VerifyPaymentResult {
                    payment_id: cmd.payment_id,
                    replayed: true,
                })
            }
            None => {
                self.record_and_activate(user, &stored_subscription_id, &cmd)
                    .await?;
                Ok(VerifyPaymentResult {
                    payment_id: cmd.payment_id,
                    replayed: false,
                })
            }
        }
    }

    async fn record_and_activate(
        &self,
        user: User,
        subscription_id: &str,
        cmd: &VerifyPaymentCommand,
    ) -> Result<(), SubscriptionError> {
        let mut updated = user;
        // Check the transition before writing anything
        updated.activate_subscription()?;

        let payment = Payment::record(
            cmd.payment_id.clone(),
            subscription_id,
            cmd.signature.clone(),
            self.clock.now(),
        );
        self.payments.create(&payment).await?;

        if let Err(save_err) = self.users.save(&updated).await {
            if let Err(rollback_err) = self.payments.delete(&payment.id).await {
                tracing::error!(
                    payment_id = %payment.gateway_payment_id,
                    error = %rollback_err,
                    "could not remove payment after failed activation"
                );
            }
            return Err(save_err.into());
        }

        self.announce(&updated, subscription_id, &cmd.payment_id).await;
        Ok(())
    }

    async fn activate(
        &self,
        user: User,
        subscription_id: &str,
        payment_id: &str,
    ) -> Result<(), SubscriptionError> {
        let mut updated = user;
        updated.activate_subscription()?;
        self.users.save(&updated).await?;
        self.announce(&updated, subscription_id, payment_id).await;
        Ok(())
    }

    async fn announce(&self, user: &User, subscription_id: &str, payment_id: &str) {
        tracing::info!(user_id = %user.id, subscription_id, payment_id, "subscription activated");

        let event = SubscriptionActivated {
            event_id: EventId::new(),
            user_id: user.id,
            subscription_id: subscription_id.to_string(),
            gateway_payment_id: payment_id.to_string(),
            activated_at: self.clock.now(),
        };
        publish_or_warn(self.events.as_ref(), &event, &user.id).await;
    }
}
