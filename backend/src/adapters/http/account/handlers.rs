//! HTTP handlers for account endpoints.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{
    ChangePasswordCommand, DeleteAccountCommand, GetProfileQuery, LoginCommand, RegisterCommand,
    UpdateProfileCommand,
};

use super::super::cookie::{cleared_session_cookie, session_cookie};
use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::super::subscription::dto::MessageResponse;
use super::dto::{
    ChangePasswordRequest, DeletedResponse, LoginRequest, ProfileResponse, RegisterRequest,
    SessionResponse, UpdateProfileRequest, UserResponse,
};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .register_handler()
        .handle(RegisterCommand {
            name: request.name,
            email: request.email,
            password: request.password,
        })
        .await?;

    let cookie = session_cookie(
        &result.token.token,
        state.web.session_ttl,
        state.web.cookie_secure,
    );
    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            success: true,
            message: "Registered successfully".to_string(),
            user: UserResponse::from(&result.user),
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    let cookie = session_cookie(
        &result.token.token,
        state.web.session_ttl,
        state.web.cookie_secure,
    );
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(SessionResponse {
            success: true,
            message: format!("Welcome back, {}", result.user.name),
            user: UserResponse::from(&result.user),
        }),
    ))
}

/// POST /logout - tokens are stateless, so this only clears the cookie
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, cleared_session_cookie(state.web.cookie_secure))],
        Json(MessageResponse::ok("Logged out successfully")),
    )
}

/// GET /me
pub async fn get_my_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .profile_handler()
        .handle(GetProfileQuery { user_id: user.id })
        .await?;

    Ok(Json(ProfileResponse {
        success: true,
        user: UserResponse::from(&user),
    }))
}

/// PUT /changepassword
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .change_password_handler()
        .handle(ChangePasswordCommand {
            user_id: user.id,
            old_password: request.old_password,
            new_password: request.new_password,
        })
        .await?;

    Ok(Json(MessageResponse::ok("Password changed successfully")))
}

/// PUT /updateprofile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            user_id: user.id,
            name: request.name,
            email: request.email,
        })
        .await?;

    Ok(Json(SessionResponse {
        success: true,
        message: "Profile updated successfully".to_string(),
        user: UserResponse::from(&user),
    }))
}

/// DELETE /me - cancels an active subscription first
pub async fn delete_my_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .delete_account_handler()
        .handle(DeleteAccountCommand {
            user_id: user.id,
            by_admin: false,
        })
        .await?;

    Ok((
        [(SET_COOKIE, cleared_session_cookie(state.web.cookie_secure))],
        Json(DeletedResponse {
            success: true,
            message: "Profile deleted successfully".to_string(),
            refunded: result.refunded,
        }),
    ))
}
