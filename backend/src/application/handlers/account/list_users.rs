//! ListUsersHandler - admin listing of all accounts.

use std::sync::Arc;

use crate::domain::user::User;
use crate::ports::UserRepository;

use super::AccountError;

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Oldest registration first.
    pub async fn handle(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.users.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_fixture::Fixture;
    use super::*;

    #[tokio::test]
    async fn lists_every_account() {
        let f = Fixture::new();
        f.user("a@example.com").await;
        f.admin("b@example.com").await;

        let users = ListUsersHandler::new(Arc::new(f.users.clone()))
            .handle()
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
    }
}
