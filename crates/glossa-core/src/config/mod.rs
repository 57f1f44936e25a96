mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::validate_locale;
use crate::error::GlossaError;
use defaults::*;

/// Top-level Glossa configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub glossa: GlossaConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaConfig {
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GlossaConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Where translations live and how lookups fall back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding `<locale>/<namespace>.<ext>` files. `~/` is expanded.
    #[serde(default = "default_root")]
    pub root: String,
    /// Locale used when the caller does not pick one.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Locales tried, in order, when a key is missing from the requested one.
    #[serde(default = "default_fallback_locales")]
    pub fallback_locales: Vec<String>,
    /// Namespace for keys without a `namespace:` prefix.
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            default_locale: default_locale(),
            fallback_locales: default_fallback_locales(),
            default_namespace: default_namespace(),
        }
    }
}

impl CatalogConfig {
    /// `root` with `~/` expanded.
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(shellexpand(&self.root))
    }
}

impl Config {
    /// Reject locale tags and namespaces that could never match a table.
    pub fn validate(&self) -> Result<(), GlossaError> {
        let catalog = &self.catalog;
        for tag in std::iter::once(&catalog.default_locale).chain(&catalog.fallback_locales) {
            validate_locale(tag)
                .map_err(|_| GlossaError::Config(format!("invalid locale tag '{tag}'")))?;
        }
        let ns = &catalog.default_namespace;
        if ns.is_empty() || ns.contains(':') {
            return Err(GlossaError::Config(format!(
                "invalid default_namespace '{ns}'"
            )));
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Returns `None` when the file does not exist; the caller falls back to
/// [`Config::default`] and reports it once logging is up.
pub fn load(path: &str) -> Result<Option<Config>, GlossaError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| GlossaError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| GlossaError::Config(format!("failed to parse config: {}", e)))?;

    config.validate()?;
    Ok(Some(config))
}
