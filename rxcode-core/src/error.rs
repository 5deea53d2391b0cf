//! Error types for barcode generation and history persistence.

use thiserror::Error;

/// Error codes for rxcode operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required field (Rx or NDC) was empty (-1)
    MissingField = -1,
    /// Persistence I/O failure (-2)
    Storage = -2,
    /// History could not be (de)serialized (-3)
    Serialization = -3,
    /// Data Matrix endpoint is not a valid URL (-4)
    InvalidEndpoint = -4,
    /// Linear barcode renderer rejected a payload (E100)
    RenderFailed = 100,
    /// No history record at the requested index (E101)
    RecordNotFound = 101,
}

/// Main error type for the generator.
#[derive(Debug, Error)]
pub enum RxError {
    #[error("Please fill in required field(s): {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Data Matrix endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to render {target} barcode: {message}")]
    Render { target: String, message: String },

    #[error("No history record at index {index} (history has {len})")]
    RecordNotFound { index: usize, len: usize },
}

impl RxError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RxError::MissingFields { .. } => ErrorCode::MissingField,
            RxError::Io(_) => ErrorCode::Storage,
            RxError::Json(_) => ErrorCode::Serialization,
            RxError::InvalidEndpoint { .. } => ErrorCode::InvalidEndpoint,
            RxError::Render { .. } => ErrorCode::RenderFailed,
            RxError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether this is a user-facing validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, RxError::MissingFields { .. })
    }
}

/// Result type alias for rxcode operations.
pub type Result<T> = std::result::Result<T, RxError>;
