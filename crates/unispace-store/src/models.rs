//! Domain model structs held by the registry.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so it can be handed directly to the mobile front end as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use unispace_shared::constants::DEFAULT_MIME_TYPE;
use unispace_shared::contact::ContactLinks;
use unispace_shared::SpaceId;

use crate::error::{Result, StoreError};

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

/// A physical room or lab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    /// Unique across the active and deleted collections.
    pub id: SpaceId,
    /// Display name, e.g. "Computer Lab A".
    pub name: String,
    /// Room number, e.g. "CL-101".
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Photo URIs, in display order.
    #[serde(default)]
    pub photos: Vec<String>,
    pub manager: ManagerContact,
    pub academic_supervisor: SupervisorContact,
    pub access_requirements: String,
    #[serde(default)]
    pub documentation: Vec<DocumentFile>,
    #[serde(default)]
    pub links: Vec<Link>,
    pub emergency_procedures: String,
    /// Serialized [`unispace_shared::QrPayload`] for this space.
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed by every mutation; never moves backwards.
    pub updated_at: DateTime<Utc>,
    /// Mirrors membership of the deleted collection.
    pub is_deleted: bool,
}

impl Space {
    /// `mailto:`/`tel:` links for the space manager.
    pub fn contact_links(&self) -> ContactLinks {
        ContactLinks::new(&self.manager.email, self.manager.phone.as_deref())
    }

    /// Advance `updated_at` to now, or keep it if the clock went backwards.
    pub(crate) fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagerContact {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupervisorContact {
    pub name: String,
    pub email: String,
    pub department: String,
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// A document attached to a space (floor plan, safety sheet, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentFile {
    pub id: String,
    /// Display name reported by the picker.
    pub name: String,
    /// Content reference on the device or remote.
    pub uri: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl DocumentFile {
    /// Build an attachment from what a document picker returns.
    ///
    /// Pickers may omit the MIME type or size; those fall back to
    /// `application/octet-stream` and 0.
    pub fn from_picker(
        name: impl Into<String>,
        uri: impl Into<String>,
        mime_type: Option<&str>,
        size: Option<u64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            uri: uri.into(),
            mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
            size: size.unwrap_or(0),
        }
    }

    /// A document needs something to open.
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(StoreError::Validation("document URI is required".into()));
        }
        Ok(())
    }

    /// Trimmed copy with a fresh id if none was given and the default MIME
    /// type if it was left blank.
    pub fn normalized(&self) -> Self {
        let mime_type = self.mime_type.trim();
        Self {
            id: id_or_fresh(&self.id),
            name: self.name.trim().to_string(),
            uri: self.uri.trim().to_string(),
            mime_type: if mime_type.is_empty() {
                DEFAULT_MIME_TYPE.to_string()
            } else {
                mime_type.to_string()
            },
            size: self.size,
        }
    }
}

/// An external link shown on the space page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Link {
    /// Title and URL are both required; a blank description is dropped.
    pub fn new(title: &str, url: &str, description: Option<&str>) -> Result<Self> {
        let link = Self {
            id: String::new(),
            title: title.to_string(),
            url: url.to_string(),
            description: description.map(str::to_string),
        };
        link.validate()?;
        Ok(link.normalized())
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.url.trim().is_empty() {
            return Err(StoreError::Validation(
                "link title and URL are both required".into(),
            ));
        }
        Ok(())
    }

    /// Trimmed copy with a fresh id if none was given.
    pub fn normalized(&self) -> Self {
        Self {
            id: id_or_fresh(&self.id),
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        }
    }
}

fn id_or_fresh(id: &str) -> String {
    let id = id.trim();
    if id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id.to_string()
    }
}
