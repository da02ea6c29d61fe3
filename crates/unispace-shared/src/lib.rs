//! # unispace-shared
//!
//! Types shared by the store and the server: identifiers, session users and
//! roles, the QR payload printed on every space, and the contact URIs the
//! end-user view hands to the platform.

pub mod constants;
pub mod contact;
pub mod error;
pub mod qr;
pub mod types;

pub use error::RoleParseError;
pub use qr::{QrError, QrPayload};
pub use types::{Role, SpaceId, User};
