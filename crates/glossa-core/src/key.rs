//! Key paths and namespace-qualified lookup keys.

use std::fmt;
use std::str::FromStr;

use crate::error::GlossaError;

/// A validated dotted key path such as `common.header.tooltip`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    /// Validate a dotted path: non-empty, and no empty segment.
    pub fn parse(path: &str) -> Result<Self, GlossaError> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(GlossaError::InvalidKeyPath(path.to_string()));
        }
        Ok(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Same path with `suffix` appended to the last segment
    /// (`items` + `_one` → `items_one`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{suffix}", self.0))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for KeyPath {
    type Err = GlossaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A lookup key with an optional namespace prefix: `namespace:path`.
///
/// The first `:` separates the namespace, so `portals/console:common.save`
/// selects namespace `portals/console` and path `common.save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub namespace: Option<String>,
    pub path: KeyPath,
}

impl LookupKey {
    pub fn parse(key: &str) -> Result<Self, GlossaError> {
        match key.split_once(':') {
            Some((namespace, path)) => {
                if namespace.is_empty() {
                    return Err(GlossaError::InvalidKeyPath(key.to_string()));
                }
                Ok(Self {
                    namespace: Some(namespace.to_string()),
                    path: KeyPath::parse(path)?,
                })
            }
            None => Ok(Self {
                namespace: None,
                path: KeyPath::parse(key)?,
            }),
        }
    }

    /// Namespace to search: the explicit prefix, else `default`.
    pub fn namespace_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(default)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}:{}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}
