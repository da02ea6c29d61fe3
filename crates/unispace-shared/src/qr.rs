use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::QR_PAYLOAD_TYPE;
use crate::types::SpaceId;

/// Content of the QR code shown on a space's door.
///
/// On the wire it is a compact JSON object, `{"spaceId":"...","type":"space"}`,
/// stored verbatim in `Space::qr_code` when the space is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub space_id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl QrPayload {
    pub fn for_space(id: &SpaceId) -> Self {
        Self {
            space_id: id.as_str().to_string(),
            kind: QR_PAYLOAD_TYPE.to_string(),
        }
    }

    /// Encode the payload as the string rendered into the QR image.
    pub fn encode(&self) -> String {
        serde_json::json!({
            "spaceId": self.space_id,
            "type": self.kind,
        })
        .to_string()
    }

    /// Decode a scanned string.
    ///
    /// Anything that is not a JSON object of the expected shape is rejected;
    /// scanners hand us arbitrary text (URLs, Wi-Fi configs, other apps' codes).
    pub fn decode(code: &str) -> Result<Self, QrError> {
        let value: Value =
            serde_json::from_str(code.trim()).map_err(|_| QrError::InvalidFormat)?;
        let obj = value.as_object().ok_or(QrError::InvalidFormat)?;

        match obj.get("type").and_then(Value::as_str) {
            Some(QR_PAYLOAD_TYPE) => {}
            _ => return Err(QrError::WrongType),
        }

        let space_id = obj
            .get("spaceId")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .ok_or(QrError::MissingSpaceId)?;

        Ok(Self {
            space_id: space_id.to_string(),
            kind: QR_PAYLOAD_TYPE.to_string(),
        })
    }

    pub fn space_id(&self) -> SpaceId {
        SpaceId(self.space_id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    #[error("QR code format is not recognized")]
    InvalidFormat,

    #[error("QR code is not valid for this app")]
    WrongType,

    #[error("QR code does not reference a space")]
    MissingSpaceId,
}
