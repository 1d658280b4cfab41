//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::{
    BillingSettings, CancelSubscriptionHandler, ChangePasswordHandler, CreateSubscriptionHandler,
    DeleteAccountHandler, GetDashboardStatsHandler, GetGatewayKeyHandler, GetProfileHandler,
    ListUsersHandler, LoginHandler, RegisterHandler, ToggleRoleHandler, UpdateProfileHandler,
    VerifyPaymentHandler,
};
use crate::application::AuthGuard;
use crate::domain::subscription::PaymentSignatureVerifier;
use crate::ports::{
    Clock, EventPublisher, PasswordHasher, PaymentGateway, PaymentRepository, SessionValidator,
    StatsRepository, TokenIssuer, UserRepository,
};

/// Browser-facing settings: redirects and the session cookie.
#[derive(Debug, Clone)]
pub struct WebSettings {
    /// Frontend base URL without a trailing slash.
    pub frontend_url: String,
    pub cookie_secure: bool,
    pub session_ttl: chrono::Duration,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            cookie_secure: false,
            session_ttl: chrono::Duration::days(15),
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is behind an `Arc`. Handlers are
/// built on demand from it.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub events: Arc<dyn EventPublisher>,
    pub clock: Arc<dyn Clock>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub sessions: Arc<dyn SessionValidator>,
    pub verifier: PaymentSignatureVerifier,
    pub gateway_key_id: String,
    pub billing: BillingSettings,
    pub web: WebSettings,
}

impl AppState {
    pub fn auth_guard(&self) -> AuthGuard {
        AuthGuard::new(self.sessions.clone(), self.users.clone())
    }

    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(
            self.users.clone(),
            self.gateway.clone(),
            self.events.clone(),
            self.clock.clone(),
            self.billing.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.users.clone(),
            self.payments.clone(),
            self.events.clone(),
            self.clock.clone(),
            self.verifier.clone(),
        )
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(
            self.users.clone(),
            self.payments.clone(),
            self.gateway.clone(),
            self.events.clone(),
            self.clock.clone(),
            self.billing.clone(),
        )
    }

    pub fn gateway_key_handler(&self) -> GetGatewayKeyHandler {
        GetGatewayKeyHandler::new(self.gateway_key_id.clone())
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.events.clone(),
            self.clock.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.users.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone())
    }

    pub fn delete_account_handler(&self) -> DeleteAccountHandler {
        DeleteAccountHandler::new(
            self.users.clone(),
            Arc::new(self.cancel_subscription_handler()),
            self.events.clone(),
            self.clock.clone(),
        )
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn toggle_role_handler(&self) -> ToggleRoleHandler {
        ToggleRoleHandler::new(self.users.clone(), self.events.clone(), self.clock.clone())
    }

    pub fn dashboard_stats_handler(&self) -> GetDashboardStatsHandler {
        GetDashboardStatsHandler::new(self.stats.clone())
    }
}
