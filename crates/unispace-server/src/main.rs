//! # unispace-server
//!
//! HTTP front for the university space registry.
//!
//! This binary provides:
//! - **Space registry** held in memory, optionally restored from and saved
//!   to a JSON snapshot
//! - **REST API** (axum) for the admin lifecycle (create, edit, soft delete,
//!   restore, purge), the session slot, and QR code resolution for end users

mod api;
mod config;
mod error;
mod lifecycle;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,unispace_server=debug,unispace_store=debug")
            }),
        )
        .init();

    info!("Starting space registry server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let mut config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Build the registry
    // -----------------------------------------------------------------------
    let registry = lifecycle::open_registry(&mut config);
    let (active, deleted) = registry.counts();
    info!(active, deleted, "Registry ready");

    let http_addr = config.http_addr;
    let app_state = AppState::new(registry, config);
    let registry_handle = app_state.registry.clone();
    let config_handle = app_state.config.clone();

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server until it fails or Ctrl+C arrives
    // -----------------------------------------------------------------------
    let served = tokio::select! {
        result = api::serve(app_state, http_addr) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            Ok(())
        }
    };

    // -----------------------------------------------------------------------
    // 5. Save the snapshot (if configured) on the way out
    // -----------------------------------------------------------------------
    match registry_handle.lock() {
        Ok(registry) => lifecycle::close_registry(&registry, &config_handle),
        Err(e) => tracing::error!(error = %e, "Registry lock poisoned, snapshot not saved"),
    }

    if let Err(ref e) = served {
        tracing::error!(error = %e, "HTTP server failed");
    }
    served
}
