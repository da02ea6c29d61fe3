//! Inputs for creating and editing spaces.
//!
//! [`SpaceDraft`] carries the create form; [`SpaceUpdate`] is an explicit
//! field-level patch where `None` means "leave unchanged".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unispace_shared::{QrPayload, SpaceId};

use crate::error::{Result, StoreError};
use crate::models::{DocumentFile, Link, ManagerContact, Space, SupervisorContact};

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpaceDraft {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub manager: ManagerContact,
    #[serde(default)]
    pub academic_supervisor: SupervisorContact,
    #[serde(default)]
    pub access_requirements: String,
    #[serde(default)]
    pub emergency_procedures: String,
    #[serde(default)]
    pub documentation: Vec<DocumentFile>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl SpaceDraft {
    /// Name, room number and the manager's name and email are mandatory.
    pub fn validate(&self) -> Result<()> {
        require("name", Some(&self.name))?;
        require("number", Some(&self.number))?;
        require("manager name", Some(&self.manager.name))?;
        require("manager email", Some(&self.manager.email))?;
        validate_attachments(&self.documentation, &self.links)
    }

    /// Turn a validated draft into a record with the given id.
    pub fn into_space(self, id: SpaceId, now: DateTime<Utc>) -> Space {
        let qr_code = QrPayload::for_space(&id).encode();

        Space {
            id,
            name: trimmed(&self.name),
            number: trimmed(&self.number),
            description: optional(self.description.as_deref()),
            photos: self.photos,
            manager: clean_manager(&self.manager),
            academic_supervisor: clean_supervisor(&self.academic_supervisor),
            access_requirements: trimmed(&self.access_requirements),
            documentation: self.documentation.iter().map(DocumentFile::normalized).collect(),
            links: self.links.iter().map(Link::normalized).collect(),
            emergency_procedures: trimmed(&self.emergency_procedures),
            qr_code,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SpaceUpdate {
    pub name: Option<String>,
    pub number: Option<String>,
    /// A blank value clears the description.
    pub description: Option<String>,
    pub photos: Option<Vec<String>>,
    pub manager: Option<ManagerContact>,
    pub academic_supervisor: Option<SupervisorContact>,
    pub access_requirements: Option<String>,
    pub emergency_procedures: Option<String>,
    pub documentation: Option<Vec<DocumentFile>>,
    pub links: Option<Vec<Link>>,
}

impl SpaceUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Every required text field that is provided must be non-blank.
    pub fn validate(&self) -> Result<()> {
        require("name", self.name.as_deref())?;
        require("number", self.number.as_deref())?;
        if let Some(ref manager) = self.manager {
            require("manager name", Some(&manager.name))?;
            require("manager email", Some(&manager.email))?;
        }
        if let Some(ref supervisor) = self.academic_supervisor {
            require("academic supervisor name", Some(&supervisor.name))?;
            require("academic supervisor email", Some(&supervisor.email))?;
            require("academic supervisor department", Some(&supervisor.department))?;
        }
        require("access requirements", self.access_requirements.as_deref())?;
        require("emergency procedures", self.emergency_procedures.as_deref())?;
        validate_attachments(
            self.documentation.as_deref().unwrap_or_default(),
            self.links.as_deref().unwrap_or_default(),
        )
    }

    /// Write the provided fields into `space`. Timestamps are left to the caller.
    pub fn apply_to(&self, space: &mut Space) {
        if let Some(ref name) = self.name {
            space.name = trimmed(name);
        }
        if let Some(ref number) = self.number {
            space.number = trimmed(number);
        }
        if let Some(ref description) = self.description {
            space.description = optional(Some(description));
        }
        if let Some(ref photos) = self.photos {
            space.photos = photos.clone();
        }
        if let Some(ref manager) = self.manager {
            space.manager = clean_manager(manager);
        }
        if let Some(ref supervisor) = self.academic_supervisor {
            space.academic_supervisor = clean_supervisor(supervisor);
        }
        if let Some(ref access) = self.access_requirements {
            space.access_requirements = trimmed(access);
        }
        if let Some(ref emergency) = self.emergency_procedures {
            space.emergency_procedures = trimmed(emergency);
        }
        if let Some(ref documentation) = self.documentation {
            space.documentation = documentation.iter().map(DocumentFile::normalized).collect();
        }
        if let Some(ref links) = self.links {
            space.links = links.iter().map(Link::normalized).collect();
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(StoreError::Validation(format!("{field} is required")))
        }
        _ => Ok(()),
    }
}

fn validate_attachments(documentation: &[DocumentFile], links: &[Link]) -> Result<()> {
    documentation.iter().try_for_each(DocumentFile::validate)?;
    links.iter().try_for_each(Link::validate)
}

fn trimmed(s: &str) -> String {
    s.trim().to_string()
}

fn optional(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn clean_manager(manager: &ManagerContact) -> ManagerContact {
    ManagerContact {
        name: trimmed(&manager.name),
        email: trimmed(&manager.email),
        phone: optional(manager.phone.as_deref()),
    }
}

fn clean_supervisor(supervisor: &SupervisorContact) -> SupervisorContact {
    SupervisorContact {
        name: trimmed(&supervisor.name),
        email: trimmed(&supervisor.email),
        department: trimmed(&supervisor.department),
    }
}
