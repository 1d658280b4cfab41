//! Stats repository port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::stats::StatsSnapshot;

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn append(&self, snapshot: &StatsSnapshot) -> Result<(), DomainError>;

    /// Up to `limit` snapshots, newest first.
    async fn latest(&self, limit: usize) -> Result<Vec<StatsSnapshot>, DomainError>;

    /// Replaces the stored snapshot with the same id.
    async fn update(&self, snapshot: &StatsSnapshot) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn StatsRepository) {}
}
