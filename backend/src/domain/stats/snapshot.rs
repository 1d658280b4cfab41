//! Monthly aggregate snapshot.
//!
//! `users` and `subscriptions` are recounted by the stats updater. `views`
//! is carried and reported but nothing in this service increments it: it
//! was fed by the course catalog, which lives elsewhere. Rows written by an
//! external writer keep their value across recounts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StatsId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub id: StatsId,
    pub users: u64,
    pub subscriptions: u64,
    /// Only ever written outside this service; stays 0 otherwise.
    pub views: u64,
    pub created_at: Timestamp,
}

impl StatsSnapshot {
    /// Opens a zeroed snapshot for the period containing `now`.
    pub fn open_period(now: Timestamp) -> Self {
        Self {
            id: StatsId::new(),
            users: 0,
            subscriptions: 0,
            views: 0,
            created_at: now,
        }
    }

    /// Overwrites user and subscription counts. Views are left as is.
    pub fn record_counts(&mut self, users: u64, subscriptions: u64, at: Timestamp) {
        self.users = users;
        self.subscriptions = subscriptions;
        self.created_at = at;
    }

    /// True when `now` still falls in this snapshot's calendar month.
    pub fn covers(&self, now: &Timestamp) -> bool {
        self.created_at.same_month_as(now)
    }
}
