//! HTTP handlers for admin endpoints. Every handler requires the admin role.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{AccountError, DeleteAccountCommand, ToggleRoleCommand};
use crate::domain::foundation::UserId;

use super::super::account::dto::{DeletedResponse, UserResponse};
use super::super::error::ApiError;
use super::super::middleware::RequireAdmin;
use super::super::state::AppState;
use super::dto::{DashboardResponse, RoleUpdatedResponse, UsersResponse};

/// Malformed ids cannot name a stored user.
fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::from(AccountError::user_not_found()))
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.list_users_handler().handle().await?;

    Ok(Json(UsersResponse {
        success: true,
        users: users.iter().map(UserResponse::from).collect(),
    }))
}

/// PUT /admin/users/:id - flip user <-> admin
pub async fn toggle_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&id)?;
    let user = state
        .toggle_role_handler()
        .handle(ToggleRoleCommand { user_id })
        .await?;

    tracing::info!(admin_id = %admin.id, user_id = %user.id, role = %user.role, "role updated");
    Ok(Json(RoleUpdatedResponse {
        success: true,
        message: "Role updated successfully".to_string(),
        user: UserResponse::from(&user),
    }))
}

/// DELETE /admin/users/:id - cancels an active subscription first
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&id)?;
    let result = state
        .delete_account_handler()
        .handle(DeleteAccountCommand {
            user_id,
            by_admin: true,
        })
        .await?;

    tracing::info!(admin_id = %admin.id, %user_id, "user deleted by admin");
    Ok(Json(DeletedResponse {
        success: true,
        message: "User deleted successfully".to_string(),
        refunded: result.refunded,
    }))
}

/// GET /admin/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.dashboard_stats_handler().handle().await?;
    Ok(Json(DashboardResponse::from(stats)))
}
