//! Error responses for the HTTP boundary.
//!
//! Every failure leaves the API as `{error_code, message}` with a status
//! chosen from the error variant.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::handlers::AccountError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::domain::subscription::SubscriptionError;

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Subscription(SubscriptionError),
    Account(AccountError),
    Auth(AuthError),
    Domain(DomainError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Subscription(e) => subscription_status(e),
            ApiError::Account(e) => match e {
                AccountError::Validation { .. } => StatusCode::BAD_REQUEST,
                AccountError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                AccountError::Conflict(_) => StatusCode::CONFLICT,
                AccountError::NotFound(_) => StatusCode::NOT_FOUND,
                AccountError::Subscription(inner) => subscription_status(inner),
                AccountError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(e) => match e {
                AuthError::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
                AuthError::ServiceUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::UNAUTHORIZED,
            },
            ApiError::Domain(e) => match e.code {
                ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
                ErrorCode::NotFound | ErrorCode::UserNotFound | ErrorCode::PaymentNotFound => {
                    StatusCode::NOT_FOUND
                }
                ErrorCode::Conflict => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Subscription(e) => e.code(),
            ApiError::Account(e) => e.code(),
            ApiError::Auth(AuthError::InsufficientPermissions(_)) => ErrorCode::Forbidden,
            ApiError::Auth(AuthError::ServiceUnavailable(_)) => ErrorCode::InternalError,
            ApiError::Auth(_) => ErrorCode::Unauthenticated,
            ApiError::Domain(e) => e.code,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Subscription(e) => e.message(),
            ApiError::Account(e) => e.message(),
            ApiError::Auth(e) => e.to_string(),
            ApiError::Domain(e) => e.message.clone(),
        }
    }
}

fn subscription_status(err: &SubscriptionError) -> StatusCode {
    match err {
        SubscriptionError::ValidationFailed { .. }
        | SubscriptionError::ForbiddenRole
        | SubscriptionError::SignatureMismatch => StatusCode::BAD_REQUEST,
        SubscriptionError::UserNotFound(_)
        | SubscriptionError::NoSubscription(_)
        | SubscriptionError::PaymentNotFound(_) => StatusCode::NOT_FOUND,
        SubscriptionError::AlreadySubscribed(_) | SubscriptionError::InvalidState { .. } => {
            StatusCode::CONFLICT
        }
        SubscriptionError::Gateway { .. } => StatusCode::BAD_GATEWAY,
        SubscriptionError::GatewayTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        SubscriptionError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        Self::Subscription(err)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self::Account(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse::new(self.code().to_string(), self.message());

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error_code = %body.error_code, message = %body.message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error_code = %body.error_code, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}
