//! GetDashboardStatsHandler - admin dashboard over the last twelve snapshots.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::stats::{DashboardStats, DASHBOARD_MONTHS};
use crate::ports::StatsRepository;

pub struct GetDashboardStatsHandler {
    stats: Arc<dyn StatsRepository>,
}

impl GetDashboardStatsHandler {
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    pub async fn handle(&self) -> Result<DashboardStats, DomainError> {
        let snapshots = self.stats.latest(DASHBOARD_MONTHS).await?;
        Ok(DashboardStats::from_newest_first(&snapshots))
    }
}
