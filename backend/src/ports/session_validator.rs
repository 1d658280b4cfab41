//! Session token ports.
//!
//! Login issues a token through `TokenIssuer`; every authenticated request
//! resolves it back to a user id through `SessionValidator`.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, IssuedToken, UserId};

/// Validates session tokens.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient failures
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Returns the user id the token was issued for.
    async fn validate(&self, token: &str) -> Result<UserId, AuthError>;
}

/// Issues session tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError>;
}
