//! GetProfileHandler - loads the caller's own account.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::User;
use crate::ports::UserRepository;

use super::AccountError;

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<User, AccountError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(AccountError::user_not_found)
    }
}
