//! Admin dashboard read model.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::StatsSnapshot;

/// Number of monthly rows the dashboard always shows.
pub const DASHBOARD_MONTHS: usize = 12;

/// One dashboard row. Padding rows have no timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRow {
    pub users: u64,
    pub subscriptions: u64,
    pub views: u64,
    pub created_at: Option<Timestamp>,
}

impl StatsRow {
    fn padding() -> Self {
        Self {
            users: 0,
            subscriptions: 0,
            views: 0,
            created_at: None,
        }
    }
}

impl From<&StatsSnapshot> for StatsRow {
    fn from(snapshot: &StatsSnapshot) -> Self {
        Self {
            users: snapshot.users,
            subscriptions: snapshot.subscriptions,
            views: snapshot.views,
            created_at: Some(snapshot.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Oldest first, always `DASHBOARD_MONTHS` long.
    pub rows: Vec<StatsRow>,
    pub users_count: u64,
    pub subscriptions_count: u64,
    pub views_count: u64,
}

impl DashboardStats {
    /// Builds the dashboard from snapshots ordered newest first.
    ///
    /// Extra snapshots beyond `DASHBOARD_MONTHS` are ignored; missing months
    /// are zero rows placed before the real ones.
    pub fn from_newest_first(snapshots: &[StatsSnapshot]) -> Self {
        let real: Vec<StatsRow> = snapshots
            .iter()
            .take(DASHBOARD_MONTHS)
            .rev()
            .map(StatsRow::from)
            .collect();

        let mut rows = vec![StatsRow::padding(); DASHBOARD_MONTHS - real.len()];
        rows.extend(real);

        let latest = rows.last().cloned().unwrap_or_else(StatsRow::padding);

        Self {
            rows,
            users_count: latest.users,
            subscriptions_count: latest.subscriptions,
            views_count: latest.views,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(users: u64, months_ago: i64) -> StatsSnapshot {
        let mut s = StatsSnapshot::open_period(Timestamp::now().minus_days(30 * months_ago));
        s.users = users;
        s.subscriptions = users / 2;
        s
    }

    #[test]
    fn empty_history_yields_twelve_zero_rows() {
        let stats = DashboardStats::from_newest_first(&[]);
        assert_eq!(stats.rows.len(), DASHBOARD_MONTHS);
        assert!(stats.rows.iter().all(|r| r.users == 0 && r.created_at.is_none()));
        assert_eq!(stats.users_count, 0);
    }

    #[test]
    fn partial_history_is_left_padded_and_oldest_first() {
        let stats = DashboardStats::from_newest_first(&[snapshot(30, 0), snapshot(20, 1)]);

        assert_eq!(stats.rows.len(), DASHBOARD_MONTHS);
        assert!(stats.rows[..10].iter().all(|r| r.created_at.is_none()));
        assert_eq!(stats.rows[10].users, 20);
        assert_eq!(stats.rows[11].users, 30);
        assert_eq!(stats.users_count, 30);
        assert_eq!(stats.subscriptions_count, 15);
    }

    #[test]
    fn long_history_keeps_latest_twelve() {
        let snapshots: Vec<_> = (0..15).map(|i| snapshot(100 - i as u64, i)).collect();

        let stats = DashboardStats::from_newest_first(&snapshots);

        assert_eq!(stats.rows.len(), DASHBOARD_MONTHS);
        assert_eq!(stats.rows[11].users, 100);
        assert_eq!(stats.rows[0].users, 89);
    }
}
