use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use opsdesk_core::config::OpsdeskConfig;
use opsdesk_core::ops::OpsdeskEngine;
use opsdesk_core::storage::{StorageBackend, UnconfiguredStorage};
use opsdesk_postgres::PgStorage;

#[derive(Parser)]
#[command(name = "opsdesk", about = "AI agent back-office operations service")]
struct Cli {
    /// PostgreSQL connection string. When unset the API still serves, but
    /// operation records are not persisted.
    #[arg(long, env = "OPSDESK_DATABASE_URL")]
    database_url: Option<String>,

    /// HTTP listen port
    #[arg(long, default_value = "8003", env = "OPSDESK_PORT")]
    port: u16,

    /// Metrics snapshot cadence in seconds
    #[arg(long, default_value = "900", env = "OPSDESK_METRICS_INTERVAL_SECS")]
    metrics_interval_secs: u64,
}

impl Cli {
    fn into_config(self) -> OpsdeskConfig {
        OpsdeskConfig {
            database_url: self.database_url,
            port: self.port,
            metrics_interval_secs: self.metrics_interval_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("opsdesk=info".parse()?),
        )
        .init();

    let config = Cli::parse().into_config();

    let storage: Arc<dyn StorageBackend> = match config.database_url.as_deref() {
        Some(url) => {
            let storage = PgStorage::connect_lazy(url)?;
            // Schema creation is best-effort: a failure degrades persistence
            // but does not stop the server.
            if let Err(e) = storage.ensure_schema().await {
                tracing::warn!("schema initialization failed: {e}");
            }
            tracing::info!("Using PostgreSQL record store");
            Arc::new(storage)
        }
        None => {
            tracing::warn!(
                "OPSDESK_DATABASE_URL not set, operation records will not be persisted"
            );
            Arc::new(UnconfiguredStorage::new("OPSDESK_DATABASE_URL"))
        }
    };

    let engine = Arc::new(OpsdeskEngine::new(storage));

    let _metrics_reporter = opsdesk_core::reporter::spawn(
        engine.clone(),
        Duration::from_secs(config.metrics_interval_secs),
    );
    tracing::info!(
        "Metrics reporter running every {}s",
        config.metrics_interval_secs
    );

    let app = opsdesk_rest::router(engine);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!("Opsdesk API listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal"),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            // Without a signal handler there is nothing to wait for.
            std::future::pending::<()>().await;
        }
    }
}
