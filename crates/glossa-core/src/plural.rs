//! Plural suffix selection.
//!
//! When a `count` param is given, a lookup first tries `key_one` or
//! `key_other` (whichever the locale's rule picks) before the bare key.

/// Plural category used to pick a key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    One,
    Other,
}

impl PluralCategory {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::One => "_one",
            Self::Other => "_other",
        }
    }
}

/// How a language splits counts into categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralRule {
    /// `1` is singular, everything else plural (English, German, Spanish, ...).
    OneOnly,
    /// `0` and `1` are singular (French, Brazilian Portuguese).
    ZeroOne,
    /// No plural distinction (Japanese, Chinese, Korean).
    Invariant,
}

impl PluralRule {
    /// Rule for a locale tag such as `fr-FR` or `pt-BR`. Unknown languages
    /// get `OneOnly`.
    pub fn for_locale(locale: &str) -> Self {
        let mut subtags = locale.split(['-', '_']);
        let language = subtags.next().unwrap_or_default().to_ascii_lowercase();
        let region = subtags.next().unwrap_or_default().to_ascii_uppercase();
        match (language.as_str(), region.as_str()) {
            ("fr", _) | ("pt", "BR") => Self::ZeroOne,
            ("ja" | "zh" | "ko", _) => Self::Invariant,
            _ => Self::OneOnly,
        }
    }

    pub fn categorize(self, count: i64) -> PluralCategory {
        match self {
            Self::OneOnly if count == 1 => PluralCategory::One,
            Self::ZeroOne if count == 0 || count == 1 => PluralCategory::One,
            _ => PluralCategory::Other,
        }
    }
}
