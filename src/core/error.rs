use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FapiaoError>;

/// Errors that can occur while building, encoding or sending an e-invoice request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FapiaoError {
    /// Missing or malformed key material. Raised at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// AES or base64 failure while encrypting or decrypting.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// The envelope or decrypted body does not match the wire protocol.
    #[error("payload error: {0}")]
    Payload(String),

    /// A field or cross-field invoice rule was violated.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The transport collaborator failed to deliver the request.
    #[error("transport error: {0}")]
    Transport(String),
}

impl FapiaoError {
    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// A single validation error with the vendor field name and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Vendor field name (e.g. "CarrierNum"), or a pseudo-field such as "Items".
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
