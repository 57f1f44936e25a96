//! Resource table: one loaded (locale, namespace) file.
//!
//! # Invariants
//!
//! 1. **Immutable**: nothing mutates a table after [`ResourceTable::new`].
//!    Callers that want to edit take a clone of [`ResourceTable::root`].
//! 2. **Root is a map**: construction rejects any other root.
//! 3. **Index matches tree**: every leaf of the tree has exactly one entry
//!    in the flattened index, keyed by its dotted path.

use std::collections::HashMap;

use crate::error::GlossaError;
use crate::node::Node;

/// An immutable tree of translations for one locale and namespace.
#[derive(Debug, Clone)]
pub struct ResourceTable {
    locale: String,
    namespace: String,
    root: Node,
    leaves: HashMap<String, Node>,
}

impl ResourceTable {
    /// Wrap a parsed tree and build the flattened leaf index.
    pub fn new(
        locale: impl Into<String>,
        namespace: impl Into<String>,
        root: Node,
    ) -> Result<Self, GlossaError> {
        if root.as_map().is_none() {
            return Err(GlossaError::malformed("", "root must be an object"));
        }
        let mut leaves = HashMap::with_capacity(root.leaf_count());
        root.for_each_leaf(|path, leaf| {
            leaves.insert(path, leaf.clone());
        });
        Ok(Self {
            locale: locale.into(),
            namespace: namespace.into(),
            root,
            leaves,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// All leaf paths, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.leaves.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Leaf at an exact dotted path, without validating the path.
    pub fn leaf(&self, path: &str) -> Option<&Node> {
        self.leaves.get(path)
    }
}
