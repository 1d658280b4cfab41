//! Axum routes for admin endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{dashboard_stats, delete_user, list_users, toggle_role};

/// Mounted under `/admin`. All routes are AdminOnly.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", put(toggle_role).delete(delete_user))
        .route("/stats", get(dashboard_stats))
}
