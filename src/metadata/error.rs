//! Metadata error types

/// Errors raised while loading or querying project metadata
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("No metadata input available from {origin}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    NoInput {
        origin: String,
        hint: Option<String>,
    },

    #[error("Failed to read metadata stream: {0}")]
    ReadFailure(#[source] std::io::Error),

    #[error("Failed to close metadata stream: {0}")]
    CloseFailure(#[source] std::io::Error),

    #[error("Metadata stream exceeds the {limit} byte size limit")]
    SizeLimitExceeded { limit: u64 },

    #[error("Metadata is not valid UTF-8: {0}")]
    DecodingFailure(#[source] std::string::FromUtf8Error),

    #[error("Malformed metadata JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Missing metadata field: {path}")]
    MissingField { path: String },

    #[error("Metadata field {path} has wrong type: expected {expected}, found {found}")]
    FieldType {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("Failed to fetch metadata from {url}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    Remote {
        url: String,
        reason: String,
        hint: Option<String>,
    },

    #[error("Metadata configuration error: {message}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    Configuration {
        message: String,
        hint: Option<String>,
    },

    #[error("Metadata schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Internal metadata error: {0}")]
    Internal(String),
}

impl MetadataError {
    /// Attach an actionable hint to the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint_val = Some(hint.into());
        match self {
            MetadataError::NoInput { ref mut hint, .. } => *hint = hint_val,
            MetadataError::Remote { ref mut hint, .. } => *hint = hint_val,
            MetadataError::Configuration { ref mut hint, .. } => *hint = hint_val,
            _ => (),
        }
        self
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        MetadataError::Configuration {
            message: message.into(),
            hint: None,
        }
    }

    /// True for errors raised by the query on a structurally unexpected document
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            MetadataError::MissingField { .. } | MetadataError::FieldType { .. }
        )
    }
}
