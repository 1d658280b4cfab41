//! Authentication middleware and extractors for axum.
//!
//! ```text
//! Request -> auth_middleware -> CurrentUser in extensions
//!                                      |
//!           RequireAuth / RequireAdmin / RequireSubscriber read it back
//! ```
//!
//! The middleware never rejects on its own, so public routes keep working
//! with a stale cookie. A token that was presented but failed validation
//! is remembered and reported by the extractors instead of `MissingToken`,
//! and the response expires the session cookie unless the handler set a
//! new one.

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::AuthGuard;
use crate::domain::foundation::AuthError;
use crate::domain::user::User;

use super::super::cookie::{cleared_session_cookie, session_token};
use super::super::error::ApiError;
use super::super::state::AppState;

/// The authenticated caller, placed in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Why a presented token did not resolve to a user.
#[derive(Debug, Clone)]
struct RejectedSession(AuthError);

/// Resolves the bearer token or `token` cookie to a user.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut stale = false;
    if let Some(token) = session_token(request.headers()) {
        match state.auth_guard().authenticate(Some(&token)).await {
            Ok(user) => {
                request.extensions_mut().insert(CurrentUser(user));
            }
            Err(err @ AuthError::ServiceUnavailable(_)) => {
                return ApiError::from(err).into_response();
            }
            Err(err) => {
                tracing::debug!(error = %err, "session token rejected");
                stale = err.requires_reauthentication();
                request.extensions_mut().insert(RejectedSession(err));
            }
        }
    }

    let mut response = next.run(request).await;
    if stale && !response.headers().contains_key(SET_COOKIE) {
        if let Ok(value) = HeaderValue::from_str(&cleared_session_cookie(state.web.cookie_secure)) {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    response
}

fn current_user(parts: &Parts) -> Result<User, ApiError> {
    if let Some(CurrentUser(user)) = parts.extensions.get::<CurrentUser>() {
        return Ok(user.clone());
    }
    let err = parts
        .extensions
        .get::<RejectedSession>()
        .map(|r| r.0.clone())
        .unwrap_or(AuthError::MissingToken);
    Err(err.into())
}

/// Any logged-in user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts).map(RequireAuth)
    }
}

/// Logged-in admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;
        AuthGuard::require_admin(&user)?;
        Ok(RequireAdmin(user))
    }
}

/// Active subscriber or admin.
#[derive(Debug, Clone)]
pub struct RequireSubscriber(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for RequireSubscriber
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;
        AuthGuard::require_subscriber(&user)?;
        Ok(RequireSubscriber(user))
    }
}
