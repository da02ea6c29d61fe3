/// Application name
pub const APP_NAME: &str = "University Space Manager";

/// Literal carried in the `type` field of every QR payload
pub const QR_PAYLOAD_TYPE: &str = "space";

/// Prefix of generated space identifiers (`space_<millis>_<suffix>`)
pub const SPACE_ID_PREFIX: &str = "space";

/// Number of random base36 characters appended to a space identifier
pub const SPACE_ID_SUFFIX_LEN: usize = 9;

/// MIME type recorded when a document picker does not report one
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;
