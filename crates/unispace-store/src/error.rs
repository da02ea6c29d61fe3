use thiserror::Error;

use unispace_shared::{QrError, SpaceId};

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A draft or update is missing a required field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Snapshot (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing a snapshot file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of resolving a scanned QR code that did not lead to a space.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Invalid QR code: {0}")]
    InvalidCode(#[from] QrError),

    #[error("Space not found: {0}")]
    NotFound(SpaceId),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
