//! The space registry.
//!
//! [`SpaceRegistry`] owns the active collection, the deleted collection
//! (recycle bin) and the session slot. A record is in exactly one of the
//! two collections; `is_deleted` always mirrors which one.
//!
//! ```text
//! Active --delete--> Deleted --purge--> (gone)
//!    ^                  |
//!    +-----restore------+
//! ```
//!
//! All lookups are linear scans; the registry is expected to hold tens to
//! low hundreds of records.

use chrono::Utc;
use tracing::{info, warn};

use unispace_shared::{QrPayload, SpaceId, User};

use crate::draft::{SpaceDraft, SpaceUpdate};
use crate::error::{Result, ScanError};
use crate::models::Space;

/// In-memory store of spaces plus the current session user.
#[derive(Debug, Default, Clone)]
pub struct SpaceRegistry {
    spaces: Vec<Space>,
    deleted_spaces: Vec<Space>,
    current_user: Option<User>,
}

impl SpaceRegistry {
    /// Create an empty registry with no session.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Replace the session user unconditionally.
    pub fn set_current_user(&mut self, user: User) {
        info!(user = %user.name, role = %user.role, "Current user set");
        self.current_user = Some(user);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Sign out.
    pub fn clear_current_user(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(user = %user.name, "Current user cleared");
        }
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Append a fully formed record to the active collection.
    ///
    /// The caller owns identifier uniqueness; use [`Self::create_space`] to
    /// get a fresh id.
    pub fn add_space(&mut self, space: Space) {
        info!(space_id = %space.id, name = %space.name, "Space added");
        self.spaces.push(space);
    }

    /// Validate a draft, assign it a fresh id and timestamps, and add it.
    pub fn create_space(&mut self, draft: SpaceDraft) -> Result<Space> {
        draft.validate()?;
        let space = draft.into_space(SpaceId::generate(), Utc::now());
        self.add_space(space.clone());
        Ok(space)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Apply `update` to the record with this id, active or deleted.
    ///
    /// Returns the updated record, or `None` when no record matches. The
    /// record stays in whichever collection it was in.
    pub fn update_space(&mut self, id: &str, update: &SpaceUpdate) -> Option<Space> {
        let Some(space) = self
            .spaces
            .iter_mut()
            .chain(self.deleted_spaces.iter_mut())
            .find(|s| s.id.as_str() == id)
        else {
            warn!(space_id = id, "Update ignored: space not found");
            return None;
        };

        update.apply_to(space);
        space.touch();

        info!(space_id = id, "Space updated");
        Some(space.clone())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Soft delete: move an active record into the recycle bin.
    ///
    /// Returns `false` if the id is not in the active collection.
    pub fn delete_space(&mut self, id: &str) -> bool {
        let Some(index) = self.spaces.iter().position(|s| s.id.as_str() == id) else {
            warn!(space_id = id, "Delete ignored: space not active");
            return false;
        };

        let mut space = self.spaces.remove(index);
        space.is_deleted = true;
        space.touch();
        self.deleted_spaces.push(space);

        info!(space_id = id, "Space deleted");
        true
    }

    /// Move a record from the recycle bin back to the end of the active list.
    ///
    /// Returns `false` if the id is not in the deleted collection.
    pub fn restore_space(&mut self, id: &str) -> bool {
        let Some(index) = self
            .deleted_spaces
            .iter()
            .position(|s| s.id.as_str() == id)
        else {
            warn!(space_id = id, "Restore ignored: space not deleted");
            return false;
        };

        let mut space = self.deleted_spaces.remove(index);
        space.is_deleted = false;
        space.touch();
        self.spaces.push(space);

        info!(space_id = id, "Space restored");
        true
    }

    // active records must be soft-deleted first
    pub fn permanently_delete_space(&mut self, id: &str) -> bool {
        let Some(index) = self
            .deleted_spaces
            .iter()
            .position(|s| s.id.as_str() == id)
        else {
            warn!(space_id = id, "Purge ignored: space not in recycle bin");
            return false;
        };

        self.deleted_spaces.remove(index);
        info!(space_id = id, "Space permanently deleted");
        true
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Active spaces in insertion order.
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// Deleted spaces in the order they were deleted.
    pub fn deleted_spaces(&self) -> &[Space] {
        &self.deleted_spaces
    }

    /// Look a space up in the active collection, then the recycle bin.
    pub fn space_by_id(&self, id: &str) -> Option<&Space> {
        self.active_space_by_id(id)
            .or_else(|| self.deleted_spaces.iter().find(|s| s.id.as_str() == id))
    }

    pub fn active_space_by_id(&self, id: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id.as_str() == id)
    }

    /// Resolve a scanned QR string to an active space.
    pub fn resolve_qr(&self, code: &str) -> std::result::Result<&Space, ScanError> {
        let payload = QrPayload::decode(code)?;
        self.active_space_by_id(&payload.space_id)
            .ok_or_else(|| ScanError::NotFound(payload.space_id()))
    }

    /// `(active, deleted)` record counts.
    pub fn counts(&self) -> (usize, usize) {
        (self.spaces.len(), self.deleted_spaces.len())
    }

    pub(crate) fn contains(&self, id: &SpaceId) -> bool {
        self.space_by_id(id.as_str()).is_some()
    }

    pub(crate) fn push_deleted(&mut self, space: Space) {
        self.deleted_spaces.push(space);
    }
}
