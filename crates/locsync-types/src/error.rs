//! Error types for configuration handling.

use thiserror::Error;

/// Errors raised while building resources and repository settings from
/// configuration. These are fatal at setup, before any update runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is absent or blank.
    #[error("missing required field `{field}` in {context}")]
    MissingField { context: String, field: String },

    /// A config line could not be understood.
    #[error("malformed config at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A resource section name is not of the form `project.resource`.
    #[error("invalid resource section name: {0:?}")]
    InvalidSection(String),

    /// No resource with this slug is declared.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// The config file could not be deserialized.
    #[error("config parse error: {0}")]
    Parse(String),

    /// I/O error while reading a config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
