//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::sync::Arc;

use api::config::DEFAULT_LOG_FILTER;
use api::{AppConfig, AppContext, bootstrap, build_app};
use auth::PgCredentialRepository;
use platform::password::PasswordHasher;
use portfolio::{PgPortfolioRepository, PortfolioCaches};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let hasher = Arc::new(PasswordHasher::new()?);
    let tokens = Arc::new(config.token_service()?);
    config.cache.log_config();
    let caches = Arc::new(PortfolioCaches::init(&config.cache));

    let credentials = PgCredentialRepository::new(pool.clone());
    let portfolio = PgPortfolioRepository::new(pool.clone());

    bootstrap::run(&credentials, &portfolio, &hasher, &config.bootstrap).await?;

    let app = build_app(
        AppContext {
            credentials,
            portfolio,
            tokens,
            hasher,
            caches: caches.clone(),
        },
        &config.http,
    )?;

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    caches.shutdown().await;
    pool.close().await;

    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
