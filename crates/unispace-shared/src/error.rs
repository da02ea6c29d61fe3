use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role: {0} (expected \"admin\" or \"user\")")]
pub struct RoleParseError(pub String);
