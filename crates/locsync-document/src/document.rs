//! The nested catalog tree.
//!
//! Keys keep their insertion order so a serialized document reads like the
//! file it came from. Order carries no meaning otherwise: two documents with
//! the same keys and values compare equal regardless of order.

use std::collections::HashMap;

/// A value in a [`Document`]: a leaf string or a nested mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A translatable phrase.
    Scalar(String),
    /// A nested group of keys.
    Map(Document),
}

impl Node {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            Node::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&Document> {
        match self {
            Node::Map(m) => Some(m),
            Node::Scalar(_) => None,
        }
    }

    /// Number of scalar leaves at or below this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Scalar(_) => 1,
            Node::Map(m) => m.leaf_count(),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value)
    }
}

impl From<Document> for Node {
    fn from(value: Document) -> Self {
        Node::Map(value)
    }
}

/// An ordered mapping from string keys to [`Node`]s.
///
/// Lookups go through a key index, so diffing catalogs with thousands of
/// keys stays linear.
#[derive(Clone, Debug, Default)]
pub struct Document {
    entries: Vec<(String, Node)>,
    /// Position of each key in `entries`. Entries are never removed.
    index: HashMap<String, usize>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a node, replacing any existing value for `key` in place.
    ///
    /// Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let node = node.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, node)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, node));
                None
            }
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of scalar leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.entries.iter().map(|(_, n)| n.leaf_count()).sum()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, node)| other.get(k) == Some(node))
    }
}

impl Eq for Document {}

impl<K: Into<String>, N: Into<Node>> FromIterator<(K, N)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (key, node) in iter {
            doc.insert(key, node);
        }
        doc
    }
}

impl IntoIterator for Document {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
