use serde::Serialize;
use thiserror::Error;

/// Enumerates high-level errors returned by this service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Represents a request body that was missing or not parseable as JSON.
    #[error("Body must be application/json")]
    InvalidJson { source: serde_json::Error },

    /// Represents a body that was JSON but failed schema validation.
    #[error("Submission failed validation")]
    Validation { errors: Vec<FieldError> },

    /// Represents a failure to serialize a record for persistence.
    #[error("Failed to serialize record")]
    Serialization { source: serde_json::Error },

    /// Represents an I/O failure while appending to the submission log.
    #[error("Failed to append record")]
    AppendFailed { source: std::io::Error },
}

/// One schema violation, addressed by field path.
#[derive(Clone, Debug, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, kind: &'static str, message: &'static str) -> Self {
        FieldError {
            field,
            kind,
            message,
        }
    }
}
