//! RegisterHandler - creates an account and signs the user in.

use std::sync::Arc;

use crate::domain::foundation::{EventId, IssuedToken};
use crate::domain::user::{validate_password, Email, User, UserRegistered};
use crate::ports::{Clock, EventPublisher, PasswordHasher, TokenIssuer, UserRepository};

use super::AccountError;
use crate::application::handlers::publish::publish_or_warn;

#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user: User,
    pub token: IssuedToken,
}

pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RegisterHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            events,
            clock,
        }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, AccountError> {
        if cmd.name.trim().is_empty() || cmd.email.trim().is_empty() || cmd.password.is_empty() {
            return Err(AccountError::validation("all", "Please enter all field"));
        }
        let email = Email::parse(&cmd.email)?;
        validate_password(&cmd.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountError::Conflict(
                "User already exists with this email".to_string(),
            ));
        }

        let hash = self.hasher.hash(&cmd.password)?;
        let user = User::register(&cmd.name, email, hash, self.clock.now())?;
        // A concurrent registration can still win; the repository reports it as Conflict
        self.users.save(&user).await?;

        let token = self.tokens.issue(&user.id)?;

        tracing::info!(user_id = %user.id, "user registered");

        let event = UserRegistered {
            event_id: EventId::new(),
            user_id: user.id,
            registered_at: user.created_at,
        };
        publish_or_warn(self.events.as_ref(), &event, &user.id).await;

        Ok(RegisterResult { user, token })
    }
}
