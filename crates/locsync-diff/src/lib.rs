//! Incremental diff engine for locsync.
//!
//! Computes the part of a localization document that must be pushed to the
//! translation platform: phrases that are new or changed in HEAD relative to
//! a reference version. Deleted phrases are never reported, since removing a
//! key locally must not delete translations that still exist remotely.
//!
//! # Key Types
//!
//! - [`diff_documents`] -- Additive tree diff between two [`Document`]s
//! - [`DiffSummary`] -- Added/modified leaf counts, for logging
//! - [`diff_between`] / [`diff_content`] -- Parse, diff, and serialize raw content
//!
//! [`Document`]: locsync_document::Document

pub mod content;
pub mod tree_diff;

pub use content::{diff_between, diff_content};
pub use tree_diff::{diff_documents, summarize, DiffSummary};
