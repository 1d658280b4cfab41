//! LoginHandler - exchanges credentials for a session token.

use std::sync::Arc;

use crate::domain::foundation::IssuedToken;
use crate::domain::user::{Email, User};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::AccountError;

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: IssuedToken,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        if cmd.email.trim().is_empty() || cmd.password.is_empty() {
            return Err(AccountError::validation("all", "Please enter all field"));
        }

        let email = Email::parse(&cmd.email).map_err(|_| AccountError::bad_credentials())?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(AccountError::bad_credentials)?;

        if !self.hasher.verify(&cmd.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "login rejected");
            return Err(AccountError::bad_credentials());
        }

        let token = self.tokens.issue(&user.id)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginResult { user, token })
    }
}
