//! Composition root: turns an `AppConfig` into a wired `AppState`.
//!
//! Shared by the server binary and the integration tests, which swap in
//! in-memory repositories and the mock gateway.

use std::sync::Arc;

use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::adapters::auth::{Argon2PasswordHasher, JwtSessionManager};
use crate::adapters::http::{AppState, RouterSettings, WebSettings};
use crate::adapters::memory::{
    InMemoryPaymentRepository, InMemoryStatsRepository, InMemoryUserRepository,
};
use crate::adapters::postgres::{
    PostgresPaymentRepository, PostgresStatsRepository, PostgresUserRepository,
};
use crate::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use crate::adapters::InMemoryEventBus;
use crate::application::handlers::{
    BillingSettings, MonthlySnapshotTask, StatsUpdater, STATS_EVENT_TYPES,
};
use crate::config::{AppConfig, ConfigError, DatabaseConfig, ValidationError};
use crate::domain::subscription::{PaymentSignatureVerifier, RefundWindow};
use crate::ports::{
    Clock, EventSubscriber, PaymentGateway, PaymentRepository, StatsRepository, UserRepository,
};

/// Anything that stops the server from coming up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three stores, behind their ports.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            payments: Arc::new(InMemoryPaymentRepository::new()),
            stats: Arc::new(InMemoryStatsRepository::new()),
        }
    }

    /// Connects the pool and optionally applies `migrations/`.
    pub async fn postgres(config: &DatabaseConfig, url: &str) -> Result<Self, StartupError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(url)
            .await?;

        if config.run_migrations {
            tracing::info!("running database migrations");
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
            stats: Arc::new(PostgresStatsRepository::new(pool)),
        })
    }

    /// Postgres when a URL is configured, in-memory otherwise.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, StartupError> {
        match config.url() {
            Some(url) => Self::postgres(config, url).await,
            None => {
                tracing::warn!("no database url configured, using in-memory storage");
                Ok(Self::in_memory())
            }
        }
    }
}

pub fn billing_settings(config: &AppConfig) -> BillingSettings {
    BillingSettings {
        plan_id: config.payment.plan_id.clone(),
        billing_cycles: config.payment.billing_cycles,
        refund_window: RefundWindow::days(config.payment.refund_days),
        gateway_timeout: config.payment.gateway_timeout(),
    }
}

pub fn router_settings(config: &AppConfig) -> RouterSettings {
    RouterSettings {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: std::time::Duration::from_secs(config.server.request_timeout_secs),
    }
}

pub fn razorpay_gateway(config: &AppConfig) -> Arc<dyn PaymentGateway> {
    let mut razorpay = RazorpayConfig::new(
        config.payment.key_id.clone(),
        SecretString::new(config.payment.key_secret.clone()),
    );
    if let Some(base) = &config.payment.api_base_url {
        razorpay = razorpay.with_base_url(base.clone());
    }
    Arc::new(RazorpayGateway::new(razorpay))
}

/// Builds the request-facing state.
pub fn build_state(
    config: &AppConfig,
    repos: &Repositories,
    gateway: Arc<dyn PaymentGateway>,
    bus: Arc<InMemoryEventBus>,
    clock: Arc<dyn Clock>,
) -> AppState {
    let sessions = Arc::new(JwtSessionManager::new(
        &SecretString::new(config.auth.jwt_secret.clone()),
        config.auth.token_ttl(),
    ));

    AppState {
        users: repos.users.clone(),
        payments: repos.payments.clone(),
        stats: repos.stats.clone(),
        gateway,
        events: bus,
        clock,
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: sessions.clone(),
        sessions,
        verifier: PaymentSignatureVerifier::new(config.payment.key_secret.as_bytes()),
        gateway_key_id: config.payment.key_id.clone(),
        billing: billing_settings(config),
        web: WebSettings {
            frontend_url: config.server.frontend_base().to_string(),
            cookie_secure: config.auth.cookie_secure,
            session_ttl: config.auth.token_ttl(),
        },
    }
}

/// Subscribes the stats updater to every count-changing event.
pub fn subscribe_stats(bus: &InMemoryEventBus, repos: &Repositories, clock: Arc<dyn Clock>) {
    let updater = Arc::new(StatsUpdater::new(
        repos.users.clone(),
        repos.stats.clone(),
        clock,
    ));
    bus.subscribe_all(STATS_EVENT_TYPES, updater);
}

pub fn snapshot_task(
    config: &AppConfig,
    repos: &Repositories,
    clock: Arc<dyn Clock>,
) -> MonthlySnapshotTask {
    MonthlySnapshotTask::new(
        repos.stats.clone(),
        clock,
        config.stats.snapshot_check_interval(),
    )
}
