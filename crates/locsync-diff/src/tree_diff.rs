//! Tree-level diff: compare two document versions key by key.
//!
//! The walk is driven by HEAD. A key missing from the reference version is
//! new and carried over with its whole subtree; two nested maps recurse; any
//! other pair is a leaf comparison (a scalar replaced by a map, or the other
//! way round, counts as changed). Keys that only exist in the reference
//! version are deletions and are skipped.

use locsync_document::{Document, Node};

/// Leaf counts of a diff, split by kind of change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Leaves under keys that do not exist in the reference version.
    pub added: usize,
    /// Leaves whose value differs from the reference version.
    pub modified: usize,
}

impl DiffSummary {
    /// Returns `true` if nothing would be uploaded.
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.modified == 0
    }

    /// Total number of changed leaves.
    pub fn total(&self) -> usize {
        self.added + self.modified
    }
}

/// Compute the new and modified entries of `head` relative to `base`.
///
/// Returns `None` when nothing differs at any depth; a present result is
/// never empty. The result keeps HEAD's nesting and key order, but only down
/// to the changed leaves.
pub fn diff_documents(head: &Document, base: &Document) -> Option<Document> {
    let mut delta = Document::new();

    for (key, head_node) in head.iter() {
        match (head_node, base.get(key)) {
            (_, None) => {
                delta.insert(key, head_node.clone());
            }
            (Node::Map(head_map), Some(Node::Map(base_map))) => {
                if let Some(nested) = diff_documents(head_map, base_map) {
                    delta.insert(key, nested);
                }
            }
            (_, Some(base_node)) => {
                if head_node != base_node {
                    delta.insert(key, head_node.clone());
                }
            }
        }
    }

    (!delta.is_empty()).then_some(delta)
}

/// Count the leaves [`diff_documents`] would report, by kind.
pub fn summarize(head: &Document, base: &Document) -> DiffSummary {
    let mut summary = DiffSummary::default();
    summarize_into(head, base, &mut summary);
    summary
}

fn summarize_into(head: &Document, base: &Document, summary: &mut DiffSummary) {
    for (key, head_node) in head.iter() {
        match (head_node, base.get(key)) {
            (_, None) => summary.added += head_node.leaf_count(),
            (Node::Map(head_map), Some(Node::Map(base_map))) => {
                summarize_into(head_map, base_map, summary);
            }
            (_, Some(base_node)) => {
                if head_node != base_node {
                    summary.modified += head_node.leaf_count();
                }
            }
        }
    }
}
