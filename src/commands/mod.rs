//! CLI command handlers. Each handler builds its output as a `String` so
//! it can be tested without capturing stdout.

mod check;
mod keys;
mod lookup;


pub use check::{handle_check, handle_validate};
pub use keys::handle_keys;
pub use lookup::handle_lookup;

use anyhow::Context as _;
use glossa_core::config::Config;
use glossa_core::{Catalog, Translator};
use std::sync::Arc;

/// Shared state for command execution.
pub struct CommandContext<'a> {
    pub catalog: Arc<Catalog>,
    pub config: &'a Config,
}

impl<'a> CommandContext<'a> {
    /// Load the translations directory named by the config.
    pub fn load(config: &'a Config) -> anyhow::Result<Self> {
        let root = config.catalog.root_path();
        let catalog = Catalog::load_dir(&root)
            .with_context(|| format!("failed to load translations from {}", root.display()))?;
        Ok(Self {
            catalog: Arc::new(catalog),
            config,
        })
    }

    /// Translator for `locale`, or the configured default.
    pub fn translator(&self, locale: Option<&str>) -> Translator {
        let base = Translator::from_config(Arc::clone(&self.catalog), &self.config.catalog);
        match locale {
            Some(locale) => base.with_locale(locale),
            None => base,
        }
    }
}

/// Parse a `name=value` interpolation param.
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{s}'")),
    }
}
