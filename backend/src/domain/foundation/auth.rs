//! Authentication types for the domain layer.
//!
//! Session tokens are issued and validated by adapters behind the
//! `SessionValidator` / `TokenIssuer` ports. These types carry no
//! dependency on a particular token format.

use super::Timestamp;
use thiserror::Error;

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Authentication and authorization failures.
///
/// `InsufficientPermissions` maps to 403; everything else except
/// `ServiceUnavailable` means the caller has to log in again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No session token on the request.
    #[error("User not logged in")]
    MissingToken,

    /// The token is malformed or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// Caller is authenticated but not allowed to use the resource.
    #[error("{0}")]
    InsufficientPermissions(String),

    /// Token signing or password hashing machinery failed.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::InsufficientPermissions(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::InvalidToken | Self::TokenExpired | Self::UserNotFound
        )
    }
}
