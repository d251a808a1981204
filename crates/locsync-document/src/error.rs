//! Error types for the document crate.

/// Errors raised while parsing or serializing localization documents.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The content is not UTF-8 text.
    #[error("content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The content is not well-formed YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The content is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not a mapping.
    #[error("document root must be a mapping, got {0}")]
    NotAMapping(&'static str),

    /// A key or value has a shape the document model cannot hold.
    #[error("unsupported {kind} at `{path}`")]
    UnsupportedValue { path: String, kind: &'static str },

    /// No parser is known for the declared resource type.
    #[error("unsupported resource type: {0}")]
    UnsupportedType(String),
}

/// Convenience alias for document results.
pub type FormatResult<T> = Result<T, FormatError>;
