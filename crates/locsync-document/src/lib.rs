//! Localization document model for locsync.
//!
//! A localization file (a Rails-style YAML catalog, a key/value JSON file) is
//! parsed into a [`Document`]: an ordered mapping from string keys to
//! [`Node`]s, each either a scalar string or a nested document.
//!
//! # Key Types
//!
//! - [`Document`] / [`Node`] -- The nested catalog tree
//! - [`Format`] -- Supported on-disk formats, resolved from a resource type
//! - [`parse`] / [`serialize`] -- Bytes to tree and back
//! - [`FormatError`] -- Malformed or unsupported content

pub mod document;
pub mod error;
pub mod format;
pub mod parse;
pub mod serialize;

pub use document::{Document, Node};
pub use error::{FormatError, FormatResult};
pub use format::Format;
pub use parse::parse;
pub use serialize::serialize;
