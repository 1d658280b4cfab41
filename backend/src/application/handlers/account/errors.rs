//! Account handler errors.

use thiserror::Error;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};
use crate::domain::subscription::SubscriptionError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Cancelling the subscription on the way to deleting the account failed.
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found() -> Self {
        Self::NotFound("User not found".to_string())
    }

    /// Same wording for unknown email and wrong password.
    pub fn bad_credentials() -> Self {
        Self::Unauthenticated("Incorrect email or password".to_string())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::Validation { .. } => ErrorCode::ValidationFailed,
            AccountError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            AccountError::Conflict(_) => ErrorCode::Conflict,
            AccountError::NotFound(_) => ErrorCode::NotFound,
            AccountError::Subscription(e) => e.code(),
            AccountError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => AccountError::Validation {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::Conflict => AccountError::Conflict(err.message),
            ErrorCode::NotFound | ErrorCode::UserNotFound => AccountError::NotFound(err.message),
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ServiceUnavailable(msg) => AccountError::Infrastructure(msg),
            other => AccountError::Unauthenticated(other.to_string()),
        }
    }
}
