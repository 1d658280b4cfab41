//! Authentication configuration

use serde::Deserialize;
use std::fmt;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum JWT secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Session token configuration (HS256 JWT)
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC key for signing session tokens
    pub jwt_secret: String,

    /// Session lifetime in days; also the cookie max-age
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// Send the session cookie with `Secure`
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_ttl_days)
    }

    /// Validate authentication configuration
    ///
    /// Short secrets are tolerated outside production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN
        {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if !(1..=365).contains(&self.token_ttl_days) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_days", &self.token_ttl_days)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_days: default_token_ttl_days(),
            cookie_secure: false,
        }
    }
}

fn default_token_ttl_days() -> i64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_secret() {
        assert_eq!(
            config("").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_short_secret_only_rejected_in_production() {
        let short = config("dev-secret");
        assert!(short.validate(&Environment::Development).is_ok());
        assert_eq!(
            short.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(32))
        );

        let long = config(&"k".repeat(32));
        assert!(long.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_ttl_bounds() {
        let mut c = config("dev-secret");
        assert_eq!(c.token_ttl(), chrono::Duration::days(15));

        c.token_ttl_days = 0;
        assert_eq!(
            c.validate(&Environment::Development),
            Err(ValidationError::InvalidTokenTtl)
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }
}
