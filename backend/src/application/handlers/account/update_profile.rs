//! UpdateProfileHandler - changes the caller's name and/or email.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{Email, User};
use crate::ports::UserRepository;

use super::AccountError;

/// Blank or absent fields are left as they are.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, AccountError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(AccountError::user_not_found)?;

        let name = cmd.name.as_deref().filter(|n| !n.trim().is_empty());
        let email = match cmd.email.as_deref().filter(|e| !e.trim().is_empty()) {
            Some(raw) => Some(Email::parse(raw)?),
            None => None,
        };

        if let Some(email) = &email {
            if let Some(holder) = self.users.find_by_email(email).await? {
                if holder.id != user.id {
                    return Err(AccountError::Conflict(
                        "User already exists with this email".to_string(),
                    ));
                }
            }
        }

        user.update_profile(name, email)?;
        // Two users racing for the same address: the repository reports Conflict
        self.users.save(&user).await?;

        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }
}
