//! Resource updater for locsync.
//!
//! When a push lands in the source repository, the updater finds a
//! resource's source file in the pushed commit and uploads it to the
//! translation project: either the whole file, or only the phrases that
//! changed since a configured diff point.
//!
//! # Architecture
//!
//! - **Collaborators** are reached through the [`RepositoryApi`] and
//!   [`TranslationApi`] traits. Concrete HTTP clients live outside this
//!   crate; [`memory`] provides in-memory implementations.
//! - **Configuration** ([`RepoConfig`], [`SyncConfig`]) is loaded once at
//!   startup and passed in; the updater holds no mutable state.
//! - **Logging** goes through an injected [`UpdateLogger`] port, defaulting
//!   to [`TracingLogger`].
//!
//! # Modules
//!
//! - [`api`]: Collaborator traits and their payload types
//! - [`config`]: Repository and project settings, TOML loading
//! - [`error`]: [`ApiError`] and [`UpdateError`]
//! - [`logger`]: The logging port
//! - [`memory`]: In-memory collaborators for tests and dry runs
//! - [`updater`]: [`ResourceUpdater`] and its [`UpdateReport`]

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod memory;
pub mod updater;

pub use api::{Blob, Commit, RepositoryApi, ResourceDetails, TranslationApi, Tree, TreeEntry};
pub use config::{ProjectConfig, RepoConfig, SyncConfig};
pub use error::{ApiError, ApiResult, UpdateError, UpdateResult};
pub use logger::{RecordingLogger, TracingLogger, UpdateLogger};
pub use memory::{ApiCall, ApiCallKind, InMemoryRepository, InMemoryTranslationProject};
pub use updater::{EntryOutcome, ResourceUpdater, UpdateReport, UploadKind};
