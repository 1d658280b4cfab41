//! Stats snapshot configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// How often the monthly snapshot task looks for a month rollover
    #[serde(default = "default_check_interval")]
    pub snapshot_check_interval_secs: u64,
}

impl StatsConfig {
    pub fn snapshot_check_interval(&self) -> Duration {
        Duration::from_secs(self.snapshot_check_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.snapshot_check_interval_secs == 0 {
            return Err(ValidationError::InvalidSnapshotInterval);
        }
        Ok(())
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            snapshot_check_interval_secs: default_check_interval(),
        }
    }
}

fn default_check_interval() -> u64 {
    3600
}
