//! Resource table loader.
//!
//! Parses one JSON or TOML resource file into a [`Node`] tree and checks the
//! structural rules before anything can look a key up:
//!
//! - every leaf is a string, or an object/array of strings;
//! - key segments are non-empty, unique among siblings, and free of `.`
//!   and `:` (those separate path segments and namespaces);
//! - the root is an object.
//!
//! A violation fails the whole file. Nothing is skipped.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::GlossaError;
use crate::node::{join_path, Node};
use crate::table::ResourceTable;

/// Key the `toml` deserializer uses to smuggle datetimes through a map.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";

/// Source syntax of a resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// Pick the format from a file extension (`json`, `toml`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, GlossaError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| GlossaError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Value as written in the source, before validation.
///
/// Maps keep every entry in authoring order, duplicates included, so the
/// builder can reject them with a path instead of letting the last one win.
#[derive(Debug)]
enum RawNode {
    Str(String),
    Seq(Vec<RawNode>),
    Map(Vec<(String, RawNode)>),
    Other(&'static str),
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawVisitor)
    }
}

struct RawVisitor;

impl<'de> Visitor<'de> for RawVisitor {
    type Value = RawNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, an array of strings, or an object")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawNode, E> {
        Ok(RawNode::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawNode, E> {
        Ok(RawNode::Str(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawNode, E> {
        Ok(RawNode::Other("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<RawNode, E> {
        Ok(RawNode::Other("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<RawNode, E> {
        Ok(RawNode::Other("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<RawNode, E> {
        Ok(RawNode::Other("a number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Other("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Other("null"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawNode, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<RawNode>()? {
            items.push(item);
        }
        Ok(RawNode::Seq(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawNode, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<RawNode>()?;
            entries.push((key, value));
        }
        Ok(RawNode::Map(entries))
    }
}

/// Parse resource source text into a validated tree.
pub fn parse_node(source: &str, format: SourceFormat) -> Result<Node, GlossaError> {
    let raw: RawNode = match format {
        SourceFormat::Json => serde_json::from_str(source)?,
        SourceFormat::Toml => toml::from_str(source)?,
    };
    match raw {
        RawNode::Map(_) => build(raw, ""),
        RawNode::Str(_) => Err(GlossaError::malformed("", "root must be an object, found a string")),
        RawNode::Seq(_) => Err(GlossaError::malformed("", "root must be an object, found an array")),
        RawNode::Other(kind) => Err(GlossaError::malformed(
            "",
            format!("root must be an object, found {kind}"),
        )),
    }
}

/// Parse and wrap source text as the table for `locale`/`namespace`.
pub fn load_str(
    source: &str,
    format: SourceFormat,
    locale: &str,
    namespace: &str,
) -> Result<ResourceTable, GlossaError> {
    let root = parse_node(source, format)?;
    let table = ResourceTable::new(locale, namespace, root)?;
    debug!(
        "loaded {}/{} ({} leaves)",
        table.locale(),
        table.namespace(),
        table.len()
    );
    Ok(table)
}

/// Read a resource file from disk. The format follows the extension.
pub fn load_file(
    path: &Path,
    locale: &str,
    namespace: &str,
) -> Result<ResourceTable, GlossaError> {
    let format = SourceFormat::from_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|e| {
        GlossaError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read {}: {e}", path.display()),
        ))
    })?;
    load_str(&source, format, locale, namespace).map_err(|e| match e {
        GlossaError::Malformed { path: key, reason } => GlossaError::Malformed {
            path: format!("{}: {key}", path.display()),
            reason,
        },
        other => other,
    })
}

fn build(raw: RawNode, path: &str) -> Result<Node, GlossaError> {
    match raw {
        RawNode::Str(s) => Ok(Node::Text(s)),
        RawNode::Seq(items) => build_list(items, path),
        RawNode::Map(entries) => build_map(entries, path),
        RawNode::Other(kind) => Err(GlossaError::malformed(
            path,
            format!("expected a string or an object, found {kind}"),
        )),
    }
}

fn build_list(items: Vec<RawNode>, path: &str) -> Result<Node, GlossaError> {
    let mut parts = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match item {
            RawNode::Str(s) => parts.push(s),
            _ => {
                return Err(GlossaError::malformed(
                    &join_path(path, &i.to_string()),
                    "array items must be strings",
                ))
            }
        }
    }
    Ok(Node::List(parts))
}

fn build_map(entries: Vec<(String, RawNode)>, path: &str) -> Result<Node, GlossaError> {
    for (key, _) in &entries {
        check_segment(key, path)?;
    }

    if let Some(parts) = as_indexed_list(&entries) {
        return Ok(Node::List(parts));
    }

    let mut children = BTreeMap::new();
    for (key, value) in entries {
        let child_path = join_path(path, &key);
        if children.contains_key(&key) {
            return Err(GlossaError::malformed(&child_path, "duplicate key"));
        }
        let child = build(value, &child_path)?;
        children.insert(key, child);
    }
    Ok(Node::Map(children))
}

fn check_segment(key: &str, parent: &str) -> Result<(), GlossaError> {
    if key == TOML_DATETIME_KEY {
        return Err(GlossaError::malformed(
            parent,
            "expected a string or an object, found a datetime",
        ));
    }
    if key.is_empty() {
        return Err(GlossaError::malformed(parent, "empty key segment"));
    }
    if key.contains('.') || key.contains(':') {
        return Err(GlossaError::malformed(
            &join_path(parent, key),
            "key segments may not contain '.' or ':'",
        ));
    }
    Ok(())
}

/// `{"0": "a", "1": "b"}` is an ordered message, not a map.
///
/// Qualifies only when the keys are exactly `0..n` in canonical form (any
/// authoring order, no duplicates) and every value is a string.
fn as_indexed_list(entries: &[(String, RawNode)]) -> Option<Vec<String>> {
    if entries.is_empty() {
        return None;
    }
    let mut slots: Vec<Option<&str>> = vec![None; entries.len()];
    for (key, value) in entries {
        let index: usize = key.parse().ok()?;
        if index.to_string() != *key || index >= slots.len() || slots[index].is_some() {
            return None;
        }
        match value {
            RawNode::Str(s) => slots[index] = Some(s),
            _ => return None,
        }
    }
    slots
        .into_iter()
        .map(|slot| slot.map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(source: &str) -> Result<Node, GlossaError> {
        parse_node(source, SourceFormat::Json)
    }

    fn malformed_path(err: GlossaError) -> String {
        match err {
            GlossaError::Malformed { path, .. } => path,
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_objects_become_maps() {
        let root = json(r#"{"common": {"header": {"tooltip": "Aide"}}}"#).unwrap();
        let tooltip = root
            .get("common")
            .and_then(|n| n.get("header"))
            .and_then(|n| n.get("tooltip"))
            .and_then(Node::as_text);
        assert_eq!(tooltip, Some("Aide"));
    }

    #[test]
    fn test_numeric_keys_become_ordered_list() {
        let root = json(r#"{"subtitles": {"1": "deux", "0": "un", "2": "trois"}}"#).unwrap();
        assert_eq!(
            root.get("subtitles").and_then(Node::as_list),
            Some(&["un".to_string(), "deux".to_string(), "trois".to_string()][..])
        );
    }

    #[test]
    fn test_gapped_numeric_keys_stay_a_map() {
        let root = json(r#"{"codes": {"0": "a", "2": "c"}}"#).unwrap();
        let codes = root.get("codes").unwrap();
        assert!(codes.as_map().is_some(), "non-contiguous indices are not a list");
        assert_eq!(codes.get("2").and_then(Node::as_text), Some("c"));
    }

    #[test]
    fn test_non_canonical_index_stays_a_map() {
        let root = json(r#"{"codes": {"00": "a"}}"#).unwrap();
        assert!(root.get("codes").unwrap().as_map().is_some());
    }

    #[test]
    fn test_numeric_keys_with_object_values_stay_a_map() {
        let root = json(r#"{"steps": {"0": {"title": "Début"}}}"#).unwrap();
        assert_eq!(
            root.get("steps")
                .and_then(|n| n.get("0"))
                .and_then(|n| n.get("title"))
                .and_then(Node::as_text),
            Some("Début")
        );
    }

    #[test]
    fn test_array_of_strings_is_a_list() {
        let root = json(r#"{"parts": ["a", "b"]}"#).unwrap();
        assert_eq!(root.get("parts").and_then(Node::as_list).map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_number_leaf_is_malformed_with_path() {
        let err = json(r#"{"common": {"count": 3}}"#).unwrap_err();
        assert_eq!(malformed_path(err), "common.count");
    }

    #[test]
    fn test_null_and_bool_leaves_are_malformed() {
        assert_eq!(malformed_path(json(r#"{"a": null}"#).unwrap_err()), "a");
        assert_eq!(malformed_path(json(r#"{"a": {"b": true}}"#).unwrap_err()), "a.b");
    }

    #[test]
    fn test_array_with_non_string_is_malformed() {
        let err = json(r#"{"parts": ["a", {"b": "c"}]}"#).unwrap_err();
        assert_eq!(malformed_path(err), "parts.1");
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let err = json(r#"{"common": {"save": "A", "save": "B"}}"#).unwrap_err();
        assert_eq!(malformed_path(err), "common.save");
    }

    #[test]
    fn test_dotted_and_empty_segments_are_rejected() {
        assert_eq!(malformed_path(json(r#"{"a.b": "x"}"#).unwrap_err()), "a.b");
        assert_eq!(malformed_path(json(r#"{"ns:a": "x"}"#).unwrap_err()), "ns:a");
        assert_eq!(malformed_path(json(r#"{"a": {"": "x"}}"#).unwrap_err()), "a");
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(json(r#""hello""#), Err(GlossaError::Malformed { .. })));
        assert!(matches!(json(r#"["a"]"#), Err(GlossaError::Malformed { .. })));
    }

    #[test]
    fn test_syntax_error_is_json_error() {
        assert!(matches!(json(r#"{"a": "#), Err(GlossaError::Json(_))));
    }

    #[test]
    fn test_toml_source() {
        let source = r#"
            [common.cookieConsent]
            confirmButton = "J'ai compris"

            [placeholders.emptyList]
            subtitles = ["La liste est vide", "Ajoutez un élément"]
        "#;
        let root = parse_node(source, SourceFormat::Toml).unwrap();
        assert_eq!(
            root.get("common")
                .and_then(|n| n.get("cookieConsent"))
                .and_then(|n| n.get("confirmButton"))
                .and_then(Node::as_text),
            Some("J'ai compris")
        );
        assert_eq!(root.leaf_count(), 2);
    }

    #[test]
    fn test_toml_integer_is_malformed() {
        let err = parse_node("[a]\nb = 1\n", SourceFormat::Toml).unwrap_err();
        assert_eq!(malformed_path(err), "a.b");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_extension("JSON"), Some(SourceFormat::Json));
        assert_eq!(SourceFormat::from_extension("toml"), Some(SourceFormat::Toml));
        assert_eq!(SourceFormat::from_extension("ts"), None);
        assert!(matches!(
            SourceFormat::from_path(Path::new("console.yaml")),
            Err(GlossaError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_file_reports_file_in_path() {
        let dir = std::env::temp_dir().join("__glossa_test_load_file__");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("bad.json");
        std::fs::write(&file, r#"{"a": 1}"#).unwrap();

        let path = malformed_path(load_file(&file, "fr-FR", "bad").unwrap_err());
        assert!(path.ends_with("bad.json: a"), "got {path}");

        let good = dir.join("good.json");
        std::fs::write(&good, r#"{"a": "b"}"#).unwrap();
        let table = load_file(&good, "fr-FR", "good").unwrap();
        assert_eq!(table.len(), 1);

        assert!(matches!(
            load_file(&dir.join("missing.json"), "fr-FR", "x"),
            Err(GlossaError::Io(_))
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
