//! Server binary for the Swiss tournament service.
//!
//! Loads configuration, installs structured logging, connects the
//! configured store backend, and serves the HTTP API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `swiss-config.yaml` (or `SWISS_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Connect the store backend, running migrations for `PostgreSQL`
//! 4. Serve the API
//! 5. Close the pool on shutdown

mod error;

use std::sync::Arc;

use swiss_api::{AppState, ServerConfig};
use swiss_core::config::{LogFormat, LoggingConfig, StoreBackend, SwissConfig};
use swiss_core::{MemoryStore, SwissStore, TournamentService};
use swiss_db::{PgSwissStore, PostgresConfig, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging, the store backend, or the
/// HTTP server fails to start.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration. Logging is not up yet, so failures surface
    //    through the returned error.
    let config = SwissConfig::load()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        backend = ?config.store.backend,
        host = config.server.host,
        port = config.server.port,
        default_sport = config.tournament.default_sport,
        "swiss-server starting"
    );

    let server_config = ServerConfig::from(&config.server);

    // 3. Connect the store backend and serve.
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            serve(&server_config, &config, MemoryStore::new()).await?;
        }
        StoreBackend::Postgres => {
            let pool = PostgresPool::connect(&PostgresConfig::from(&config.database)).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            let result = serve(&server_config, &config, PgSwissStore::new(pool.clone())).await;
            pool.close().await;
            result?;
        }
    }

    info!("swiss-server shutdown complete");
    Ok(())
}

/// Build the service around `store` and run the HTTP server.
async fn serve<S: SwissStore + 'static>(
    server_config: &ServerConfig,
    config: &SwissConfig,
    store: S,
) -> Result<(), ServerError> {
    let service = TournamentService::new(store, &config.tournament);
    let state = Arc::new(AppState::new(service));
    swiss_api::start_server(server_config, state).await?;
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), ServerError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match logging.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ServerError::Logging {
        message: e.to_string(),
    })
}
