//! URIs handed to the platform to reach a space's manager.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactLinks {
    /// `mailto:` URI, absent when no email is on record.
    pub email: Option<String>,
    /// `tel:` URI, absent when no phone number is on record.
    pub phone: Option<String>,
}

impl ContactLinks {
    pub fn new(email: &str, phone: Option<&str>) -> Self {
        Self {
            email: mailto_uri(email),
            phone: phone.and_then(tel_uri),
        }
    }
}

pub fn mailto_uri(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return None;
    }
    Some(format!("mailto:{email}"))
}

pub fn tel_uri(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("tel:{digits}"))
}
