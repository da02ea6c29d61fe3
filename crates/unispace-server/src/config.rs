//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use unispace_shared::constants::{APP_NAME, DEFAULT_HTTP_PORT};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// Human-readable name reported by `/info`.
    /// Env: `INSTANCE_NAME`
    /// Default: `"University Space Manager"`
    pub instance_name: String,

    /// Whether to start with the demo admin session and demo space when no
    /// snapshot was loaded.
    /// Env: `SEED_DEMO_DATA` (true/false)
    /// Default: `true`
    pub seed_demo_data: bool,

    /// JSON snapshot read at start-up (if the file exists) and written on
    /// shutdown.
    /// Env: `SNAPSHOT_PATH`
    /// Default: unset (registry lives in memory only).
    pub snapshot_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            instance_name: APP_NAME.to_string(),
            seed_demo_data: true,
            snapshot_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(
                    value = %addr,
                    "Invalid HTTP_ADDR, using default"
                );
            }
        }

        if let Ok(name) = std::env::var("INSTANCE_NAME") {
            config.instance_name = name;
        }

        if let Ok(val) = std::env::var("SEED_DEMO_DATA") {
            config.seed_demo_data = parse_flag(&val);
        }

        if let Ok(path) = std::env::var("SNAPSHOT_PATH") {
            if !path.trim().is_empty() {
                config.snapshot_path = Some(PathBuf::from(path));
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

fn parse_flag(val: &str) -> bool {
    let val = val.trim();
    !val.eq_ignore_ascii_case("false") && val != "0"
}
