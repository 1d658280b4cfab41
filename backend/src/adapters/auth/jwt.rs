//! HS256 session tokens.
//!
//! Login issues a signed JWT whose subject is the user id. The same secret
//! validates it on every authenticated request; expiry is enforced by
//! `jsonwebtoken` against the `exp` claim.

use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, IssuedToken, Timestamp, UserId};
use crate::ports::{SessionValidator, TokenIssuer};

/// Registered claims carried in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates session JWTs with a shared secret.
pub struct JwtSessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl JwtSessionManager {
    pub fn new(secret: &SecretString, token_ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            token_ttl,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtSessionManager {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = Timestamp::from_datetime(*issued_at.as_datetime() + self.token_ttl);
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.as_datetime().timestamp(),
            exp: expires_at.as_datetime().timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to sign session token");
                AuthError::service_unavailable("could not issue session token")
            })?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionManager {
    async fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Self::validation()).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("session token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!(error = %e, "session token rejected");
                        AuthError::InvalidToken
                    }
                }
            },
        )?;

        data.claims.sub.parse::<UserId>().map_err(|_| {
            tracing::warn!(sub = %data.claims.sub, "session token subject is not a user id");
            AuthError::InvalidToken
        })
    }
}

impl std::fmt::Debug for JwtSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionManager")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
