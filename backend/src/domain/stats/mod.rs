//! Admin statistics.
//!
//! One `StatsSnapshot` per calendar month, kept current by the stats
//! updater and read back by the admin dashboard.

mod dashboard;
mod snapshot;

pub use dashboard::{DashboardStats, StatsRow, DASHBOARD_MONTHS};
pub use snapshot::StatsSnapshot;
