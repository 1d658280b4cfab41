//! ChangePasswordHandler - replaces the caller's password after checking the old one.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::validate_password;
use crate::ports::{PasswordHasher, UserRepository};

use super::AccountError;

#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub old_password: String,
    pub new_password: String,
}

pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Existing sessions stay valid; tokens are not tied to the password.
    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), AccountError> {
        if cmd.old_password.is_empty() || cmd.new_password.is_empty() {
            return Err(AccountError::validation("all", "Please enter all field"));
        }

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(AccountError::user_not_found)?;

        if !self.hasher.verify(&cmd.old_password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "password change rejected");
            return Err(AccountError::validation(
                "oldPassword",
                "Incorrect old password",
            ));
        }
        validate_password(&cmd.new_password)?;

        user.set_password_hash(self.hasher.hash(&cmd.new_password)?);
        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixture::Fixture;
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn handler(f: &Fixture) -> ChangePasswordHandler {
        ChangePasswordHandler::new(Arc::new(f.users.clone()), f.hasher.clone())
    }

    fn cmd(user_id: UserId, old: &str, new: &str) -> ChangePasswordCommand {
        ChangePasswordCommand {
            user_id,
            old_password: old.to_string(),
            new_password: new.to_string(),
        }
    }

    async fn stored_hash(f: &Fixture, id: &UserId) -> String {
        f.users.find_by_id(id).await.unwrap().unwrap().password_hash
    }

    #[tokio::test]
    async fn replaces_hash_when_old_password_matches() {
        let f = Fixture::new();
        let user = f.user_with_password("a@example.com", "secret123").await;

        handler(&f)
            .handle(cmd(user.id, "secret123", "better456"))
            .await
            .unwrap();

        let hash = stored_hash(&f, &user.id).await;
        assert!(f.hasher.verify("better456", &hash).unwrap());
        assert!(!f.hasher.verify("secret123", &hash).unwrap());
    }

    #[tokio::test]
    async fn wrong_old_password_leaves_hash_untouched() {
        let f = Fixture::new();
        let user = f.user_with_password("a@example.com", "secret123").await;

        let err = handler(&f)
            .handle(cmd(user.id, "guess-1", "better456"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.message(), "Incorrect old password");
        assert_eq!(stored_hash(&f, &user.id).await, user.password_hash);
    }

    #[tokio::test]
    async fn new_password_must_meet_policy() {
        let f = Fixture::new();
        let user = f.user_with_password("a@example.com", "secret123").await;

        let err = handler(&f)
            .handle(cmd(user.id, "secret123", "abc"))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Validation { ref field, .. } if field == "password"));
        assert_eq!(stored_hash(&f, &user.id).await, user.password_hash);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let f = Fixture::new();
        let user = f.user("a@example.com").await;

        let err = handler(&f).handle(cmd(user.id, "", "better456")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let f = Fixture::new();

        let err = handler(&f)
            .handle(cmd(UserId::new(), "secret123", "better456"))
            .await
            .unwrap_err();

        assert_eq!(err, AccountError::user_not_found());
    }
}
