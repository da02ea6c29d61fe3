//! # unispace-store
//!
//! In-memory registry of university spaces for the space manager.
//!
//! The crate exposes a synchronous [`SpaceRegistry`] that owns two
//! collections, active and deleted (the recycle bin), plus the session slot
//! for the signed-in user. Records move between the collections through
//! soft delete and restore and leave the registry only through a purge of
//! the recycle bin. Nothing is persisted unless the caller exports a
//! [`RegistrySnapshot`].

pub mod draft;
pub mod models;
pub mod registry;
pub mod seed;
pub mod snapshot;

mod error;

pub use draft::{SpaceDraft, SpaceUpdate};
pub use error::{Result, ScanError, StoreError};
pub use models::*;
pub use registry::SpaceRegistry;
pub use snapshot::{ImportStats, RegistrySnapshot};
