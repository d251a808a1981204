//! Error types for the updater crate.

use thiserror::Error;

/// Errors reported by a repository or translation-project collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested object does not exist remotely.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The remote rejected the request.
    #[error("request failed: {0}")]
    Request(String),

    /// A response payload could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The collaborator cannot serve requests at all.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias for collaborator results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that abort a resource update.
///
/// Malformed source content does not appear here: it only fails the tree
/// entry it was found in and is reported through
/// [`UpdateReport`](crate::UpdateReport).
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    #[error("configuration error: {0}")]
    Config(#[from] locsync_types::ConfigError),
}

/// Convenience alias for update results.
pub type UpdateResult<T> = Result<T, UpdateError>;
