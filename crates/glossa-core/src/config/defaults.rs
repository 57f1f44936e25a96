//! Default value functions used by serde for config deserialization.

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_root() -> String {
    "translations".to_string()
}

pub fn default_locale() -> String {
    "fr-FR".to_string()
}

pub fn default_fallback_locales() -> Vec<String> {
    vec!["en-US".to_string()]
}

pub fn default_namespace() -> String {
    "portals/console".to_string()
}
