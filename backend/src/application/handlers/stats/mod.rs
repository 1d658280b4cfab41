//! Stats handlers.
//!
//! - `StatsUpdater` reacts to account and subscription events
//! - `MonthlySnapshotTask` opens a row per calendar month
//! - `GetDashboardStatsHandler` serves the admin dashboard

mod get_dashboard_stats;
mod monthly_snapshot;
mod stats_updater;

pub use get_dashboard_stats::GetDashboardStatsHandler;
pub use monthly_snapshot::MonthlySnapshotTask;
pub use stats_updater::{StatsUpdater, STATS_EVENT_TYPES};
