//! Registry start-up and shutdown.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use unispace_store::{seed, SpaceRegistry};

use crate::config::ServerConfig;

/// Build the registry the server starts with.
///
/// A readable snapshot wins; otherwise the demo data is seeded when enabled.
/// Snapshots carry no session, so the demo admin is signed in on top of one
/// when seeding is enabled.
/// An unreadable snapshot is moved aside to `<path>.corrupt` so the server
/// still starts and shutdown cannot overwrite it. If it cannot be moved,
/// saving is disabled for this run.
pub fn open_registry(config: &mut ServerConfig) -> SpaceRegistry {
    if let Some(path) = config.snapshot_path.clone() {
        if path.exists() {
            match SpaceRegistry::load_from(&path) {
                Ok(mut registry) => {
                    if config.seed_demo_data {
                        registry.set_current_user(seed::demo_admin());
                    }
                    return registry;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to load snapshot, starting fresh");
                    if !set_aside(&path) {
                        config.snapshot_path = None;
                    }
                }
            }
        }
    }

    if config.seed_demo_data {
        info!("Seeding demo data");
        SpaceRegistry::with_demo_data()
    } else {
        SpaceRegistry::new()
    }
}

fn set_aside(path: &Path) -> bool {
    let aside = corrupt_path(path);
    match std::fs::rename(path, &aside) {
        Ok(()) => {
            warn!(from = %path.display(), to = %aside.display(), "Unreadable snapshot moved aside");
            true
        }
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "Could not move unreadable snapshot, saving disabled"
            );
            false
        }
    }
}

pub(crate) fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Persist the registry if a snapshot path is configured.
pub fn close_registry(registry: &SpaceRegistry, config: &ServerConfig) {
    let Some(ref path) = config.snapshot_path else {
        return;
    };

    match registry.save_to(path) {
        Ok(()) => info!(path = %path.display(), "Snapshot saved"),
        Err(e) => tracing::error!(path = %path.display(), error = %e, "Failed to save snapshot"),
    }
}
