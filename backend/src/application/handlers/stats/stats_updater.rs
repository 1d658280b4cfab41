//! StatsUpdater - keeps the current snapshot's counts in step with the users table.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::stats::StatsSnapshot;
use crate::ports::{Clock, EventHandler, StatsRepository, UserRepository};

/// Events after which user or subscription counts may have moved.
pub const STATS_EVENT_TYPES: &[&str] = &[
    "user.registered.v1",
    "user.deleted.v1",
    "user.role_changed.v1",
    "subscription.activated.v1",
    "subscription.cancelled.v1",
];

/// Recounts from the repository on every event, so duplicate or reordered
/// deliveries converge to the same numbers.
pub struct StatsUpdater {
    users: Arc<dyn UserRepository>,
    stats: Arc<dyn StatsRepository>,
    clock: Arc<dyn Clock>,
}

impl StatsUpdater {
    pub fn new(
        users: Arc<dyn UserRepository>,
        stats: Arc<dyn StatsRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { users, stats, clock }
    }

    pub async fn refresh(&self) -> Result<StatsSnapshot, DomainError> {
        let users = self.users.count_users().await?;
        let subscriptions = self.users.count_active_subscriptions().await?;
        let now = self.clock.now();

        match self.stats.latest(1).await?.into_iter().next() {
            Some(mut current) if current.covers(&now) => {
                current.record_counts(users, subscriptions, now);
                self.stats.update(&current).await?;
                Ok(current)
            }
            _ => {
                let mut opened = StatsSnapshot::open_period(now);
                opened.record_counts(users, subscriptions, now);
                self.stats.append(&opened).await?;
                Ok(opened)
            }
        }
    }
}

#[async_trait]
impl EventHandler for StatsUpdater {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let snapshot = self.refresh().await?;
        tracing::debug!(
            event_type = %event.event_type,
            users = snapshot.users,
            subscriptions = snapshot.subscriptions,
            "stats refreshed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "StatsUpdater"
    }
}
