//! Key-path resolution against a single table.
//!
//! Leaf paths hit the flattened index; only subtree lookups walk the tree.
//! Matching is exact per segment. A list leaf also answers `<path>.<i>`
//! with its i-th part, so `subtitles.0` reads the first line of
//! `subtitles`.

use std::collections::BTreeMap;

use crate::error::GlossaError;
use crate::key::KeyPath;
use crate::node::Node;
use crate::table::ResourceTable;

/// What a key path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Text(&'a str),
    List(&'a [String]),
    Tree(&'a BTreeMap<String, Node>),
}

impl<'a> Resolved<'a> {
    fn from_node(node: &'a Node) -> Self {
        match node {
            Node::Text(s) => Resolved::Text(s),
            Node::List(parts) => Resolved::List(parts),
            Node::Map(children) => Resolved::Tree(children),
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Resolved::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl ResourceTable {
    /// Resolve a key path to a leaf or subtree.
    pub fn resolve(&self, path: &KeyPath) -> Result<Resolved<'_>, GlossaError> {
        self.get(path.as_str()).ok_or_else(|| GlossaError::KeyNotFound {
            locale: self.locale().to_string(),
            namespace: self.namespace().to_string(),
            key: path.to_string(),
        })
    }

    /// Like [`resolve`](Self::resolve) but on a raw string; invalid paths
    /// simply resolve to nothing.
    pub fn get(&self, path: &str) -> Option<Resolved<'_>> {
        if let Some(leaf) = self.leaf(path) {
            return Some(Resolved::from_node(leaf));
        }
        if let Some(part) = self.list_part(path) {
            return Some(Resolved::Text(part));
        }
        if path.is_empty() {
            return None;
        }
        let mut node = self.root();
        for segment in path.split('.') {
            node = node.get(segment)?;
        }
        // Leaves were already answered by the index.
        node.as_map().map(Resolved::Tree)
    }

    /// `parent.<i>` where `parent` is a list leaf and `i` a canonical index.
    fn list_part(&self, path: &str) -> Option<&str> {
        let (parent, index) = path.rsplit_once('.')?;
        if index.is_empty()
            || !index.bytes().all(|b| b.is_ascii_digit())
            || (index.len() > 1 && index.starts_with('0'))
        {
            return None;
        }
        let parts = self.leaf(parent)?.as_list()?;
        parts.get(index.parse::<usize>().ok()?).map(String::as_str)
    }
}
