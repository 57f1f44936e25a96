//! Translator: an explicit locale context for lookups.
//!
//! There is no process-wide "current locale". A [`Translator`] carries the
//! catalog, the locale, its fallback chain and the default namespace;
//! switching locale means making a new handle with
//! [`with_locale`](Translator::with_locale).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior of `t()` |
//! |---------|-------|-------------------|
//! | Missing key | Not in locale or any fallback | Returns the key as written |
//! | Invalid key | Empty path or segment | Returns the key as written |
//! | Subtree | Key names a map, not a string | Returns the key as written |
//! | Missing param | `{{name}}` with no `name` | Token left as-is |

use std::sync::Arc;
use tracing::warn;

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::error::GlossaError;
use crate::interpolate::interpolate;
use crate::key::LookupKey;
use crate::plural::PluralRule;
use crate::resolve::Resolved;

/// A successful lookup and the table that answered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub locale: &'a str,
    pub namespace: &'a str,
    pub value: Resolved<'a>,
}

/// Cheap, cloneable lookup handle over a shared catalog.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    locale: String,
    fallbacks: Vec<String>,
    namespace: String,
}

impl Translator {
    pub fn new(
        catalog: Arc<Catalog>,
        locale: impl Into<String>,
        default_namespace: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            locale: locale.into(),
            fallbacks: Vec::new(),
            namespace: default_namespace.into(),
        }
    }

    /// Handle for the configured default locale, fallbacks and namespace.
    pub fn from_config(catalog: Arc<Catalog>, config: &CatalogConfig) -> Self {
        Self::new(catalog, &config.default_locale, &config.default_namespace)
            .with_fallbacks(config.fallback_locales.clone())
    }

    /// Locales to try, in order, after the handle's own locale.
    pub fn with_fallbacks(mut self, fallbacks: Vec<String>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Same catalog, fallbacks and namespace; different locale.
    pub fn with_locale(&self, locale: impl Into<String>) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            locale: locale.into(),
            fallbacks: self.fallbacks.clone(),
            namespace: self.namespace.clone(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn default_namespace(&self) -> &str {
        &self.namespace
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The handle's locale followed by its fallbacks, without repeats.
    pub fn chain(&self) -> Vec<&str> {
        let mut chain: Vec<&str> = Vec::with_capacity(1 + self.fallbacks.len());
        for locale in std::iter::once(&self.locale).chain(&self.fallbacks) {
            if !chain.contains(&locale.as_str()) {
                chain.push(locale);
            }
        }
        chain
    }

    /// Resolve `key` (optionally `namespace:path`) along the locale chain.
    pub fn lookup(&self, key: &str) -> Result<Resolution<'_>, GlossaError> {
        self.lookup_counted(key, None)
    }

    /// Like [`lookup`](Self::lookup), trying the plural variant for `count`
    /// (`key_one` / `key_other`) before the bare key in each locale.
    pub fn lookup_counted(
        &self,
        key: &str,
        count: Option<i64>,
    ) -> Result<Resolution<'_>, GlossaError> {
        let key = LookupKey::parse(key)?;
        let namespace = key.namespace_or(&self.namespace);

        for locale in self.chain() {
            let Some(table) = self.catalog.table(locale, namespace) else {
                continue;
            };
            let plural = count.map(|n| {
                let category = PluralRule::for_locale(locale).categorize(n);
                key.path.with_suffix(category.suffix())
            });
            let candidates = plural.iter().chain(std::iter::once(&key.path));
            for path in candidates {
                if let Some(value) = table.get(path.as_str()) {
                    return Ok(Resolution {
                        locale: table.locale(),
                        namespace: table.namespace(),
                        value,
                    });
                }
            }
        }

        Err(GlossaError::KeyNotFound {
            locale: self.locale.clone(),
            namespace: namespace.to_string(),
            key: key.path.to_string(),
        })
    }

    /// Translate `key` and substitute `params`.
    ///
    /// Never fails: anything that cannot be rendered as a string comes back
    /// as `key` itself, so a missing translation is visible but harmless.
    /// A `count` param that parses as an integer selects plural variants.
    /// Multi-part messages are joined with a space.
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.lookup_counted(key, count_param(params)) {
            Ok(Resolution {
                value: Resolved::Text(template),
                ..
            }) => interpolate(template, params),
            Ok(Resolution {
                value: Resolved::List(parts),
                ..
            }) => interpolate(&parts.join(" "), params),
            Ok(Resolution {
                value: Resolved::Tree(_),
                ..
            }) => {
                warn!(key, locale = %self.locale, "key names a subtree, showing key");
                key.to_string()
            }
            Err(e) => {
                warn!(key, locale = %self.locale, "translation missing, showing key: {e}");
                key.to_string()
            }
        }
    }

    /// Translate an ordered multi-part message, interpolating each part.
    ///
    /// A single string comes back as a one-part list. Returns `None` when
    /// the key is missing or names a subtree.
    pub fn t_list(&self, key: &str, params: &[(&str, &str)]) -> Option<Vec<String>> {
        match self.lookup_counted(key, count_param(params)).ok()?.value {
            Resolved::Text(template) => Some(vec![interpolate(template, params)]),
            Resolved::List(parts) => Some(
                parts
                    .iter()
                    .map(|part| interpolate(part, params))
                    .collect(),
            ),
            Resolved::Tree(_) => None,
        }
    }

    /// Whether `key` resolves to anything along the chain.
    pub fn exists(&self, key: &str) -> bool {
        self.lookup(key).is_ok()
    }
}

/// The integer `count` param, if any, used to pick plural variants.
pub fn count_param(params: &[(&str, &str)]) -> Option<i64> {
    params
        .iter()
        .find(|(name, _)| *name == "count")
        .and_then(|(_, value)| value.trim().parse().ok())
}
