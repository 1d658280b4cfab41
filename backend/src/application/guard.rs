//! AuthGuard - resolves session tokens to users and applies role gates.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::user::User;
use crate::ports::{SessionValidator, UserRepository};

/// Authenticated / AdminOnly / SubscriberOnly checks.
///
/// The HTTP middleware calls `authenticate`; route extractors apply the
/// role checks on the resolved user.
pub struct AuthGuard {
    sessions: Arc<dyn SessionValidator>,
    users: Arc<dyn UserRepository>,
}

impl AuthGuard {
    pub fn new(sessions: Arc<dyn SessionValidator>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }

    /// Validates the token and loads its user.
    ///
    /// A valid token whose user has since been deleted is `UserNotFound`.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<User, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let user_id = self.sessions.validate(token).await?;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed during authentication");
                AuthError::service_unavailable("user store unavailable")
            })?
            .ok_or(AuthError::UserNotFound)
    }

    pub fn require_admin(user: &User) -> Result<(), AuthError> {
        if user.is_admin() {
            Ok(())
        } else {
            Err(AuthError::forbidden(format!(
                "{} is not allowed to access this resource",
                user.role
            )))
        }
    }

    /// Active subscribers and admins pass.
    pub fn require_subscriber(user: &User) -> Result<(), AuthError> {
        if user.can_access_subscriber_content() {
            Ok(())
        } else {
            Err(AuthError::forbidden("Only subscribers can access this resource"))
        }
    }
}
