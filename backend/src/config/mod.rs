//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables carry the `COURSEBUNDLER`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use coursebundler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;
mod stats;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use stats::StatsConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; absent means in-memory storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session tokens
    pub auth: AuthConfig,

    /// Razorpay
    pub payment: PaymentConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` first when present, then reads `COURSEBUNDLER__*`
    /// variables:
    ///
    /// - `COURSEBUNDLER__SERVER__PORT=4000` -> `server.port = 4000`
    /// - `COURSEBUNDLER__PAYMENT__KEY_SECRET=...` -> `payment.key_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COURSEBUNDLER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        self.stats.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "COURSEBUNDLER__AUTH__JWT_SECRET",
        "COURSEBUNDLER__PAYMENT__KEY_ID",
        "COURSEBUNDLER__PAYMENT__KEY_SECRET",
        "COURSEBUNDLER__PAYMENT__REFUND_DAYS",
        "COURSEBUNDLER__DATABASE__URL",
        "COURSEBUNDLER__SERVER__PORT",
        "COURSEBUNDLER__SERVER__ENVIRONMENT",
        "COURSEBUNDLER__SERVER__FRONTEND_URL",
    ];

    fn set_minimal_env() {
        env::set_var("COURSEBUNDLER__AUTH__JWT_SECRET", "dev-secret");
        env::set_var("COURSEBUNDLER__PAYMENT__KEY_ID", "rzp_test_key");
        env::set_var("COURSEBUNDLER__PAYMENT__KEY_SECRET", "rzp_secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.auth.jwt_secret, "dev-secret");
        assert_eq!(config.payment.key_id, "rzp_test_key");
        assert_eq!(config.payment.refund_days, 7);
        assert_eq!(config.database.url(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.stats.snapshot_check_interval_secs, 3600);
    }

    #[test]
    fn test_overrides() {
        let config = load_with(&[
            ("COURSEBUNDLER__SERVER__PORT", "5000"),
            ("COURSEBUNDLER__PAYMENT__REFUND_DAYS", "14"),
            ("COURSEBUNDLER__DATABASE__URL", "postgres://localhost/coursebundler"),
            ("COURSEBUNDLER__SERVER__FRONTEND_URL", "https://app.example"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.payment.refund_days, 14);
        assert_eq!(config.database.url(), Some("postgres://localhost/coursebundler"));
        assert_eq!(config.server.frontend_url, "https://app.example");
    }

    #[test]
    fn test_production_requires_long_secret() {
        let config = load_with(&[("COURSEBUNDLER__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }

    #[test]
    fn test_missing_payment_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        env::set_var("COURSEBUNDLER__AUTH__JWT_SECRET", "dev-secret");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
