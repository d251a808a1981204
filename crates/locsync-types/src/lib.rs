//! Foundation types for locsync.
//!
//! This crate holds the value objects shared by every other locsync crate:
//! translation resources as declared in the project's tx config, their
//! branch-scoped variants, and the category metadata that records branch
//! association on the translation platform.
//!
//! # Key Types
//!
//! - [`Resource`]: A single translatable file tracked by a translation project
//! - [`BranchResource`]: A resource scoped to a branch via a slug suffix
//! - [`TxResource`]: Common view over both, consumed by the updater and APIs
//! - [`TxConfig`]: Parsed translation config (`[project.resource]` sections)
//! - [`Categories`]: Flat key/value metadata stored in the category field

pub mod categories;
pub mod error;
pub mod resource;
pub mod slug;
pub mod tx_config;

pub use categories::Categories;
pub use error::{ConfigError, ConfigResult};
pub use resource::{BranchResource, Resource, TxResource};
pub use slug::{absolute_branch, slugify};
pub use tx_config::TxConfig;
