//! DeleteAccountHandler - removes an account, cancelling any live subscription first.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::user::UserDeleted;
use crate::ports::{Clock, EventPublisher, UserRepository};

use super::AccountError;
use crate::application::handlers::publish::publish_or_warn;
use crate::application::handlers::subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler,
};

#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
    /// True when an admin deletes someone else's account.
    pub by_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAccountResult {
    /// Set when a subscription had to be cancelled first.
    pub refunded: Option<bool>,
}

/// Shared by self-service deletion and admin deletion.
///
/// A held subscription, paid or not, goes through the normal cancellation
/// path (gateway cancel plus refund rules). If that fails the account is kept.
pub struct DeleteAccountHandler {
    users: Arc<dyn UserRepository>,
    canceller: Arc<CancelSubscriptionHandler>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DeleteAccountHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        canceller: Arc<CancelSubscriptionHandler>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            canceller,
            events,
            clock,
        }
    }

    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<DeleteAccountResult, AccountError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(AccountError::user_not_found)?;

        let refunded = if !user.subscription.is_empty() {
            let cancelled = self
                .canceller
                .handle(CancelSubscriptionCommand { user_id: user.id })
                .await?;
            Some(cancelled.refunded())
        } else {
            None
        };

        self.users.delete(&user.id).await?;

        tracing::info!(user_id = %user.id, by_admin = cmd.by_admin, "account deleted");

        let event = UserDeleted {
            event_id: EventId::new(),
            user_id: user.id,
            by_admin: cmd.by_admin,
            deleted_at: self.clock.now(),
        };
        publish_or_warn(self.events.as_ref(), &event, &user.id).await;

        Ok(DeleteAccountResult { refunded })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixture::Fixture;
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::PaymentGatewayError;

    fn handler(f: &Fixture) -> DeleteAccountHandler {
        DeleteAccountHandler::new(
            Arc::new(f.users.clone()),
            f.canceller(),
            f.bus.clone(),
            f.clock.clone(),
        )
    }

    #[tokio::test]
    async fn deletes_plain_account_without_gateway() {
        let f = Fixture::new();
        let user = f.user("a@example.com").await;

        let result = handler(&f)
            .handle(DeleteAccountCommand { user_id: user.id, by_admin: false })
            .await
            .unwrap();

        assert_eq!(result.refunded, None);
        assert!(f.users.is_empty().await);
        assert!(f.gateway.calls().is_empty());
        assert!(f.bus.has_event("user.deleted.v1"));
    }

    #[tokio::test]
    async fn active_subscription_is_cancelled_at_gateway_first() {
        let f = Fixture::new();
        let user = f.subscriber("a@example.com").await;

        let result = handler(&f)
            .handle(DeleteAccountCommand { user_id: user.id, by_admin: true })
            .await
            .unwrap();

        assert_eq!(result.refunded, Some(true));
        assert!(f.gateway.was_called("cancel_subscription"));
        assert!(f.gateway.was_called("refund_payment"));
        assert!(f.payments.is_empty().await);
        assert!(f.users.is_empty().await);
        assert!(f.bus.has_event("subscription.cancelled.v1"));
    }

    #[tokio::test]
    async fn unpaid_checkout_is_cancelled_at_gateway_too() {
        let f = Fixture::new();
        let mut user = f.user("a@example.com").await;
        user.start_subscription("sub_pending").unwrap();
        f.users.save(&user).await.unwrap();

        let result = handler(&f)
            .handle(DeleteAccountCommand { user_id: user.id, by_admin: false })
            .await
            .unwrap();

        assert_eq!(result.refunded, Some(false));
        assert_eq!(f.gateway.call_count("cancel_subscription"), 1);
        assert!(!f.gateway.was_called("refund_payment"));
        assert!(f.users.is_empty().await);
    }

    #[tokio::test]
    async fn failed_cancellation_keeps_account() {
        let f = Fixture::new();
        let user = f.subscriber("a@example.com").await;
        f.gateway.set_method_error(
            "cancel_subscription",
            PaymentGatewayError::from_status(500, "boom"),
        );

        let err = handler(&f)
            .handle(DeleteAccountCommand { user_id: user.id, by_admin: false })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::GatewayError);
        assert_eq!(f.users.len().await, 1);
        assert!(!f.bus.has_event("user.deleted.v1"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let f = Fixture::new();

        let err = handler(&f)
            .handle(DeleteAccountCommand { user_id: UserId::new(), by_admin: true })
            .await
            .unwrap_err();

        assert_eq!(err, AccountError::user_not_found());
    }
}
