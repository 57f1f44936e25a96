//! Resource nodes: the in-memory shape of one translation file.

use serde::Serialize;
use std::collections::BTreeMap;

/// One value in a resource tree.
///
/// Leaves are `Text` (a template, stored verbatim) or `List` (an ordered
/// multi-part message). Everything else is a `Map` of key segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// A leaf string template.
    Text(String),
    /// An ordered sequence of message parts, e.g. multi-paragraph subtitles.
    List(Vec<String>),
    /// A nested namespace.
    Map(BTreeMap<String, Node>),
}

impl Node {
    /// Whether this node is a leaf (`Text` or `List`).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Map(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Node::List(parts) => Some(parts),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Map(children) => Some(children),
            _ => None,
        }
    }

    /// Child by key segment. Leaves have no children.
    pub fn get(&self, segment: &str) -> Option<&Node> {
        self.as_map().and_then(|children| children.get(segment))
    }

    /// Mutable child by key segment.
    ///
    /// Only reachable on an owned tree (e.g. a clone of a table's root);
    /// loaded tables never hand out mutable access.
    pub fn get_mut(&mut self, segment: &str) -> Option<&mut Node> {
        match self {
            Node::Map(children) => children.get_mut(segment),
            _ => None,
        }
    }

    /// Number of leaves under this node (a leaf counts itself).
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Map(children) => children.values().map(Node::leaf_count).sum(),
            _ => 1,
        }
    }

    /// Visit every leaf with its dotted path relative to this node.
    ///
    /// Visits in key order, so output is deterministic.
    pub fn for_each_leaf<'a>(&'a self, mut f: impl FnMut(String, &'a Node)) {
        self.walk("", &mut f);
    }

    fn walk<'a>(&'a self, prefix: &str, f: &mut impl FnMut(String, &'a Node)) {
        match self {
            Node::Map(children) => {
                for (segment, child) in children {
                    child.walk(&join_path(prefix, segment), f);
                }
            }
            leaf => f(prefix.to_string(), leaf),
        }
    }
}

/// Join a parent path and a child segment with `.`.
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut header = BTreeMap::new();
        header.insert("tooltip".to_string(), Node::Text("Aide".into()));
        header.insert(
            "subtitles".to_string(),
            Node::List(vec!["Un".into(), "Deux".into()]),
        );
        let mut common = BTreeMap::new();
        common.insert("header".to_string(), Node::Map(header));
        common.insert("save".to_string(), Node::Text("Enregistrer".into()));
        let mut root = BTreeMap::new();
        root.insert("common".to_string(), Node::Map(common));
        Node::Map(root)
    }

    #[test]
    fn test_leaf_count_counts_lists_once() {
        assert_eq!(sample().leaf_count(), 3);
    }

    #[test]
    fn test_for_each_leaf_yields_sorted_dotted_paths() {
        let root = sample();
        let mut paths = Vec::new();
        root.for_each_leaf(|path, _| paths.push(path));
        assert_eq!(
            paths,
            vec![
                "common.header.subtitles",
                "common.header.tooltip",
                "common.save"
            ]
        );
    }

    #[test]
    fn test_get_walks_one_segment() {
        let root = sample();
        let common = root.get("common").unwrap();
        assert_eq!(common.get("save").and_then(Node::as_text), Some("Enregistrer"));
        assert!(common.get("save").unwrap().get("anything").is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample();
        let mut copy = original.clone();
        if let Some(Node::Map(common)) = copy.get_mut("common") {
            common.insert("save".to_string(), Node::Text("Sauver".into()));
        }
        assert_eq!(
            original.get("common").and_then(|c| c.get("save")).and_then(Node::as_text),
            Some("Enregistrer")
        );
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["common"]["header"]["subtitles"][1], "Deux");
        assert_eq!(json["common"]["save"], "Enregistrer");
    }
}
