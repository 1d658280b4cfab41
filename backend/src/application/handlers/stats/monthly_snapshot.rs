//! MonthlySnapshotTask - opens a fresh stats row when the calendar month turns.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::DomainError;
use crate::domain::stats::StatsSnapshot;
use crate::ports::{Clock, StatsRepository};

/// Background task that appends a zeroed snapshot whenever the latest one
/// belongs to an earlier month (or none exists).
pub struct MonthlySnapshotTask {
    stats: Arc<dyn StatsRepository>,
    clock: Arc<dyn Clock>,
    check_interval: Duration,
}

impl MonthlySnapshotTask {
    pub fn new(
        stats: Arc<dyn StatsRepository>,
        clock: Arc<dyn Clock>,
        check_interval: Duration,
    ) -> Self {
        Self {
            stats,
            clock,
            check_interval,
        }
    }

    /// Runs until `shutdown` flips to true. Check failures are logged and
    /// retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.check_interval);
        tracing::info!(interval_secs = self.check_interval.as_secs(), "monthly snapshot task started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("monthly snapshot task stopping");
                        return;
                    }
                }
                _ = interval.tick() => {
                    if let Err(e) = self.check_once().await {
                        tracing::warn!(error = %e, "monthly snapshot check failed");
                    }
                }
            }
        }
    }

    /// Returns true if a new snapshot was appended.
    pub async fn check_once(&self) -> Result<bool, DomainError> {
        let now = self.clock.now();
        let needs_new = match self.stats.latest(1).await?.first() {
            Some(latest) => !latest.covers(&now),
            None => true,
        };

        if needs_new {
            self.stats.append(&StatsSnapshot::open_period(now)).await?;
            tracing::info!(at = %now.as_datetime(), "opened new monthly stats snapshot");
        }
        Ok(needs_new)
    }
}
