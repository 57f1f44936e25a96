//! Catalog of resource tables keyed by locale and namespace.
//!
//! Files live at `<root>/<locale>/<namespace>.<ext>`: the first directory
//! level is the locale, and the rest of the relative path (without the
//! extension) is the namespace, so `translations/fr-FR/portals/console.json`
//! is locale `fr-FR`, namespace `portals/console`.
//!
//! Every (locale, namespace) pair owns its own table. Two tables with the
//! same top-level keys never see each other.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::GlossaError;
use crate::loader::{load_file, SourceFormat};
use crate::table::ResourceTable;

/// Immutable set of loaded tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<(String, String), Arc<ResourceTable>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. Loading the same pair twice is an error.
    pub fn insert(&mut self, table: ResourceTable) -> Result<(), GlossaError> {
        let key = (table.locale().to_string(), table.namespace().to_string());
        if self.tables.contains_key(&key) {
            return Err(GlossaError::DuplicateTable {
                locale: key.0,
                namespace: key.1,
            });
        }
        self.tables.insert(key, Arc::new(table));
        Ok(())
    }

    /// Load every resource file under `root`.
    ///
    /// Fails on the first malformed file; a catalog is never half-loaded.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self, GlossaError> {
        let root = root.as_ref();
        let mut catalog = Self::new();

        for entry in read_dir_sorted(root)? {
            if !entry.is_dir() {
                debug!("skipping {} (not a locale directory)", entry.display());
                continue;
            }
            let locale = file_name(&entry);
            validate_locale(&locale)?;

            let mut files = Vec::new();
            collect_files(&entry, &mut files)?;
            for file in files {
                let Some(namespace) = namespace_for(&entry, &file) else {
                    debug!("skipping {} (unsupported extension)", file.display());
                    continue;
                };
                if namespace.contains(':') {
                    return Err(GlossaError::malformed(
                        &file.display().to_string(),
                        "namespace may not contain ':'",
                    ));
                }
                catalog.insert(load_file(&file, &locale, &namespace)?)?;
            }
        }

        info!(
            "loaded {} tables across {} locales from {}",
            catalog.len(),
            catalog.locales().len(),
            root.display()
        );
        Ok(catalog)
    }

    pub fn table(&self, locale: &str, namespace: &str) -> Option<&Arc<ResourceTable>> {
        self.tables.get(&(locale.to_string(), namespace.to_string()))
    }

    pub fn contains_locale(&self, locale: &str) -> bool {
        self.tables.keys().any(|(l, _)| l == locale)
    }

    /// Loaded locale tags, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(|(l, _)| l.as_str()).collect();
        locales.dedup();
        locales
    }

    /// Namespaces loaded for `locale`, sorted.
    pub fn namespaces(&self, locale: &str) -> Vec<&str> {
        self.tables
            .keys()
            .filter(|(l, _)| l == locale)
            .map(|(_, ns)| ns.as_str())
            .collect()
    }

    /// All tables in (locale, namespace) order.
    pub fn tables(&self) -> impl Iterator<Item = &Arc<ResourceTable>> {
        self.tables.values()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Check a locale tag: `-`-separated ASCII alphanumeric subtags, the first
/// being a two or three letter language code (`fr`, `fr-FR`, `zh-CN`).
pub fn validate_locale(tag: &str) -> Result<(), GlossaError> {
    let mut subtags = tag.split('-');
    let language = subtags.next().unwrap_or_default();
    let language_ok =
        (2..=3).contains(&language.len()) && language.bytes().all(|b| b.is_ascii_alphabetic());
    let rest_ok = subtags.all(|s| !s.is_empty() && s.len() <= 8 && s.bytes().all(|b| b.is_ascii_alphanumeric()));
    if language_ok && rest_ok {
        Ok(())
    } else {
        Err(GlossaError::InvalidLocale(tag.to_string()))
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, GlossaError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        GlossaError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read {}: {e}", dir.display()),
        ))
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry?.path());
    }
    paths.sort();
    Ok(paths)
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), GlossaError> {
    for path in read_dir_sorted(dir)? {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<locale_dir>/portals/console.json` → `portals/console`.
fn namespace_for(locale_dir: &Path, file: &Path) -> Option<String> {
    let ext = file.extension()?.to_str()?;
    SourceFormat::from_extension(ext)?;
    let relative = file.strip_prefix(locale_dir).ok()?.with_extension("");
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
