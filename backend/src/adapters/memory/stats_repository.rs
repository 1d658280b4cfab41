//! In-memory stats store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::stats::StatsSnapshot;
use crate::ports::StatsRepository;

/// Snapshots kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatsRepository {
    snapshots: Arc<RwLock<Vec<StatsSnapshot>>>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn append(&self, snapshot: &StatsSnapshot) -> Result<(), DomainError> {
        self.snapshots.write().await.push(snapshot.clone());
        Ok(())
    }

    async fn latest(&self, limit: usize) -> Result<Vec<StatsSnapshot>, DomainError> {
        let mut snapshots = self.snapshots.read().await.clone();
        // Stable sort keeps insertion order among equal timestamps
        snapshots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        snapshots.truncate(limit);
        Ok(snapshots)
    }

    async fn update(&self, snapshot: &StatsSnapshot) -> Result<(), DomainError> {
        let mut snapshots = self.snapshots.write().await;
        match snapshots.iter_mut().find(|s| s.id == snapshot.id) {
            Some(existing) => {
                *existing = snapshot.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotFound,
                format!("stats snapshot {} not found", snapshot.id),
            )),
        }
    }
}
