use thiserror::Error;

/// Top-level error type for Glossa.
#[derive(Debug, Error)]
pub enum GlossaError {
    /// A resource file violates the structural rules of a table.
    #[error("malformed resource at '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// No value exists at the requested key path.
    #[error("key '{key}' not found in {locale}/{namespace}")]
    KeyNotFound {
        locale: String,
        namespace: String,
        key: String,
    },

    /// A key path was empty or contained an empty segment.
    #[error("invalid key path: '{0}'")]
    InvalidKeyPath(String),

    /// A locale tag was malformed.
    #[error("invalid locale: '{0}'")]
    InvalidLocale(String),

    /// No table is loaded for the locale.
    #[error("locale '{0}' is not loaded")]
    UnknownLocale(String),

    /// The same locale/namespace pair was loaded twice.
    #[error("table {locale}/{namespace} is already loaded")]
    DuplicateTable { locale: String, namespace: String },

    /// The resource file extension is not one we can parse.
    #[error("unsupported resource format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML syntax error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GlossaError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        let path = if path.is_empty() { "<root>" } else { path };
        Self::Malformed {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
