//! Response bodies for admin endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::stats::{DashboardStats, StatsRow};

use super::super::account::dto::UserResponse;

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleUpdatedResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsRowResponse {
    pub users: u64,
    pub subscriptions: u64,
    pub views: u64,
    pub created_at: Option<String>,
}

impl From<&StatsRow> for StatsRowResponse {
    fn from(row: &StatsRow) -> Self {
        Self {
            users: row.users,
            subscriptions: row.subscriptions,
            views: row.views,
            created_at: row.created_at.map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

/// Twelve monthly rows, oldest first, plus the latest counts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub success: bool,
    pub stats: Vec<StatsRowResponse>,
    pub users_count: u64,
    pub subscription_count: u64,
    pub views_count: u64,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            success: true,
            stats: stats.rows.iter().map(StatsRowResponse::from).collect(),
            users_count: stats.users_count,
            subscription_count: stats.subscriptions_count,
            views_count: stats.views_count,
        }
    }
}
