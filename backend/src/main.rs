//! CourseBundler API server.
//!
//! ```bash
//! COURSEBUNDLER__AUTH__JWT_SECRET=... \
//! COURSEBUNDLER__PAYMENT__KEY_ID=rzp_test_... \
//! COURSEBUNDLER__PAYMENT__KEY_SECRET=... \
//! cargo run
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coursebundler::adapters::http::api_router;
use coursebundler::adapters::{InMemoryEventBus, SystemClock};
use coursebundler::app::{self, Repositories, StartupError};
use coursebundler::config::AppConfig;
use coursebundler::ports::Clock;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal(stop: watch::Sender<bool>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
    let _ = stop.send(true);
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "CourseBundler API starting"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repos = Repositories::from_config(&config.database).await?;
    let bus = Arc::new(InMemoryEventBus::new());
    app::subscribe_stats(&bus, &repos, clock.clone());

    let (stop_tx, stop_rx) = watch::channel(false);
    let snapshots = app::snapshot_task(&config, &repos, clock.clone());
    let snapshot_handle = tokio::spawn(async move { snapshots.run(stop_rx).await });

    let state = app::build_state(
        &config,
        &repos,
        app::razorpay_gateway(&config),
        bus,
        clock,
    );
    let router = api_router(state, &app::router_settings(&config));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(stop_tx))
        .await?;

    if let Err(e) = snapshot_handle.await {
        tracing::warn!(error = %e, "snapshot task ended abnormally");
    }
    tracing::info!("server stopped");
    Ok(())
}
