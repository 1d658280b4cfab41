//! In-memory user store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{Email, User};
use crate::ports::UserRepository;

/// User records held in a map. Used when no database is configured and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `save` fail with a database error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::database("user store unavailable"));
        }

        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|existing| existing.email == user.email && existing.id != user.id);
        if taken {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "User already exists with this email",
            ));
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.users.write().await.remove(id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn count_users(&self) -> Result<u64, DomainError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn count_active_subscriptions(&self) -> Result<u64, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.subscription.is_active())
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn user(email: &str, at: Timestamp) -> User {
        User::register("Test", Email::parse(email).unwrap(), "$argon2id$stub", at).unwrap()
    }

    #[tokio::test]
    async fn save_then_find_by_id_and_email() {
        let repo = InMemoryUserRepository::new();
        let u = user("a@example.com", Timestamp::now());
        repo.save(&u).await.unwrap();

        assert_eq!(repo.find_by_id(&u.id).await.unwrap(), Some(u.clone()));
        assert_eq!(
            repo.find_by_email(&Email::parse("A@Example.com").unwrap())
                .await
                .unwrap()
                .map(|f| f.id),
            Some(u.id)
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.save(&user("a@example.com", Timestamp::now())).await.unwrap();

        let err = repo
            .save(&user("a@example.com", Timestamp::now()))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn resaving_same_user_is_an_update() {
        let repo = InMemoryUserRepository::new();
        let mut u = user("a@example.com", Timestamp::now());
        repo.save(&u).await.unwrap();
        u.name = "Renamed".to_string();
        repo.save(&u).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.find_by_id(&u.id).await.unwrap().unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn counts_only_active_subscriptions() {
        let repo = InMemoryUserRepository::new();
        let mut active = user("a@example.com", Timestamp::now());
        active.start_subscription("sub_1").unwrap();
        active.activate_subscription().unwrap();
        let mut pending = user("b@example.com", Timestamp::now());
        pending.start_subscription("sub_2").unwrap();
        repo.save(&active).await.unwrap();
        repo.save(&pending).await.unwrap();
        repo.save(&user("c@example.com", Timestamp::now())).await.unwrap();

        assert_eq!(repo.count_users().await.unwrap(), 3);
        assert_eq!(repo.count_active_subscriptions().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_all_is_oldest_first() {
        let repo = InMemoryUserRepository::new();
        let now = Timestamp::now();
        let newer = user("new@example.com", now);
        let older = user("old@example.com", now.minus_days(3));
        repo.save(&newer).await.unwrap();
        repo.save(&older).await.unwrap();

        let ids: Vec<UserId> = repo.list_all().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![older.id, newer.id]);
    }

    #[tokio::test]
    async fn failing_saves_surface_database_errors() {
        let repo = InMemoryUserRepository::new();
        repo.fail_saves(true);

        let err = repo.save(&user("a@example.com", Timestamp::now())).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(repo.is_empty().await);
    }
}
