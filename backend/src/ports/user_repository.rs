//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Email, User};

/// Persistence for user records, including the embedded subscription.
///
/// Each call is its own unit of work. No multi-record transactions.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Insert or update.
    ///
    /// # Errors
    ///
    /// `ErrorCode::Conflict` if another user already holds the email.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Deleting a missing user is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// All users, oldest registration first.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    async fn count_users(&self) -> Result<u64, DomainError>;

    async fn count_active_subscriptions(&self) -> Result<u64, DomainError>;
}
