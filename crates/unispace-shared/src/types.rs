use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{SPACE_ID_PREFIX, SPACE_ID_SUFFIX_LEN};
use crate::error::RoleParseError;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// Space identity = opaque string, `space_<unix millis>_<base36 suffix>` when generated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SpaceId(pub String);

impl SpaceId {
    /// Fresh identifier for a newly created space.
    ///
    /// The millisecond timestamp alone collides when two spaces are created
    /// within the same tick, so a random base36 suffix is appended.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SPACE_ID_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("{SPACE_ID_PREFIX}_{millis}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SpaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for SpaceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// The signed-in user. Lives only in the session slot, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub university_id: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_prefix_and_suffix() {
        let id = SpaceId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "space");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SPACE_ID_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn rapid_generation_does_not_collide() {
        let ids: std::collections::HashSet<SpaceId> =
            (0..1_000).map(|_| SpaceId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn user_wire_format_is_camel_case() {
        let user = User {
            id: "1".into(),
            email: "admin@university.edu".into(),
            name: "Admin User".into(),
            role: Role::Admin,
            university_id: "ADMIN001".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["universityId"], "ADMIN001");
        assert_eq!(json["role"], "admin");
        assert!(user.is_admin());
    }
}
