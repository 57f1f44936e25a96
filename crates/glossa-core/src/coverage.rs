//! Translation coverage: how much of a reference locale each other locale
//! covers, namespace by namespace.
//!
//! Coverage is per table; fallback chains are deliberately ignored so the
//! report shows what a translator still has to do.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::error::GlossaError;
use crate::interpolate::placeholders;
use crate::node::Node;
use crate::table::ResourceTable;

/// Coverage of every loaded locale against a reference locale.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub reference: String,
    pub locales: Vec<LocaleCoverage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocaleCoverage {
    pub locale: String,
    pub namespaces: Vec<NamespaceCoverage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamespaceCoverage {
    pub namespace: String,
    /// Leaf keys in the reference table.
    pub total: usize,
    /// Reference keys the target also has.
    pub present: usize,
    /// Reference keys the target lacks.
    pub missing: Vec<String>,
    /// Keys only the target has.
    pub extra: Vec<String>,
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
    /// Between 0.0 and 100.0; an empty reference counts as fully covered.
    pub coverage_percent: f32,
}

/// A key whose `{{placeholder}}` names differ from the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderMismatch {
    pub key: String,
    pub expected: Vec<String>,
    pub found: Vec<String>,
}

impl NamespaceCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.placeholder_mismatches.is_empty()
    }
}

impl CoverageReport {
    /// No missing keys and no placeholder mismatches anywhere.
    pub fn is_complete(&self) -> bool {
        self.locales
            .iter()
            .flat_map(|l| &l.namespaces)
            .all(NamespaceCoverage::is_complete)
    }
}

/// Compare every other loaded locale against `reference`.
pub fn coverage(catalog: &Catalog, reference: &str) -> Result<CoverageReport, GlossaError> {
    if !catalog.contains_locale(reference) {
        return Err(GlossaError::UnknownLocale(reference.to_string()));
    }

    let locales = catalog
        .locales()
        .into_iter()
        .filter(|locale| *locale != reference)
        .map(|locale| LocaleCoverage {
            locale: locale.to_string(),
            namespaces: catalog
                .namespaces(reference)
                .into_iter()
                .filter_map(|ns| {
                    let reference_table = catalog.table(reference, ns)?;
                    let target = catalog.table(locale, ns).map(|t| &**t);
                    Some(compare(reference_table, target))
                })
                .collect(),
        })
        .collect();

    Ok(CoverageReport {
        reference: reference.to_string(),
        locales,
    })
}

fn compare(reference: &ResourceTable, target: Option<&ResourceTable>) -> NamespaceCoverage {
    let reference_keys: BTreeSet<&str> = reference.keys().into_iter().collect();
    let target_keys: BTreeSet<&str> = target
        .map(|t| t.keys().into_iter().collect())
        .unwrap_or_default();

    let missing: Vec<String> = reference_keys
        .difference(&target_keys)
        .map(|k| k.to_string())
        .collect();
    let extra: Vec<String> = target_keys
        .difference(&reference_keys)
        .map(|k| k.to_string())
        .collect();

    let mut placeholder_mismatches = Vec::new();
    if let Some(target) = target {
        for key in reference_keys.intersection(&target_keys) {
            let (Some(expected), Some(found)) = (reference.leaf(key), target.leaf(key)) else {
                continue;
            };
            let expected = placeholder_set(expected);
            let found = placeholder_set(found);
            if expected != found {
                placeholder_mismatches.push(PlaceholderMismatch {
                    key: key.to_string(),
                    expected,
                    found,
                });
            }
        }
    }

    let total = reference_keys.len();
    let present = total - missing.len();
    let coverage_percent = if total == 0 {
        100.0
    } else {
        (present as f32 / total as f32) * 100.0
    };

    NamespaceCoverage {
        namespace: reference.namespace().to_string(),
        total,
        present,
        missing,
        extra,
        placeholder_mismatches,
        coverage_percent,
    }
}

/// Sorted placeholder names used anywhere in a leaf.
fn placeholder_set(leaf: &Node) -> Vec<String> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    match leaf {
        Node::Text(s) => names.extend(placeholders(s)),
        Node::List(parts) => {
            for part in parts {
                names.extend(placeholders(part));
            }
        }
        Node::Map(_) => {}
    }
    names.into_iter().collect()
}
