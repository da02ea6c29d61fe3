use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::Space;
use crate::registry::SpaceRegistry;

/// Full registry contents, serialized to JSON. The session user is not included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot {
    pub created_at: DateTime<Utc>,
    /// App version that produced the snapshot
    pub version: String,
    pub spaces: Vec<Space>,
    pub deleted_spaces: Vec<Space>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportStats {
    pub spaces_imported: usize,
    pub deleted_imported: usize,
    /// Records skipped because their id already exists in the registry.
    pub skipped: usize,
}

impl SpaceRegistry {
    pub fn export_snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            created_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            spaces: self.spaces().to_vec(),
            deleted_spaces: self.deleted_spaces().to_vec(),
        }
    }

    /// Merge a snapshot into the registry without overwriting existing records.
    ///
    /// Each record lands in the collection of the list it came from, and its
    /// `is_deleted` flag is rewritten to match.
    pub fn import_snapshot(&mut self, snapshot: &RegistrySnapshot) -> ImportStats {
        let mut stats = ImportStats::default();

        for space in &snapshot.spaces {
            if self.contains(&space.id) {
                stats.skipped += 1;
                continue;
            }
            let mut space = space.clone();
            space.is_deleted = false;
            self.add_space(space);
            stats.spaces_imported += 1;
        }

        for space in &snapshot.deleted_spaces {
            if self.contains(&space.id) {
                stats.skipped += 1;
                continue;
            }
            let mut space = space.clone();
            space.is_deleted = true;
            self.push_deleted(space);
            stats.deleted_imported += 1;
        }

        info!(
            spaces = stats.spaces_imported,
            deleted = stats.deleted_imported,
            skipped = stats.skipped,
            "Snapshot imported"
        );
        stats
    }

    /// Write the registry contents to `path` as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.export_snapshot())?;
        std::fs::write(path, json)?;

        debug!(path = %path.display(), "Snapshot written");
        Ok(())
    }

    /// Build a registry from a snapshot file written by [`Self::save_to`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: RegistrySnapshot = serde_json::from_str(&json)?;

        let mut registry = Self::new();
        registry.import_snapshot(&snapshot);

        info!(path = %path.display(), "Registry loaded from snapshot");
        Ok(registry)
    }
}
