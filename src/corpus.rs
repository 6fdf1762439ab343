//! The raw per-locale locale corpus ("LocaleSet" in the data model): sample
//! format strings, weekday/month/am-pm/alternate-digit lists, each mapped to
//! the locales that use them. This module only holds and validates that
//! data; the actual prefix/suffix/keyword extraction lives in
//! `crate::tables`.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::CorpusError;

/// The bundled default corpus for the `"glibc"` provider, produced the way
/// a `localedef`/`lc_time`-style extraction tool would (that extraction
/// tool itself is out of scope for this crate).
const GLIBC_CORPUS: &str = include_str!("../assets/locales/glibc.json");

/// Structured per-locale time facts, as loaded from an external source.
/// Every field maps a string key to the set of locale identifiers in which
/// it holds; unknown top-level keys are ignored by `serde`, and any of the
/// six fields may be entirely absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleSet {
    /// Sample `strftime`-style format strings, such as `"%a %b %e %T %Y"`.
    #[serde(default)]
    pub formats: HashMap<String, Vec<String>>,
    /// Semicolon-separated ordered weekday names, index 0 = Sunday.
    #[serde(default)]
    pub day: HashMap<String, Vec<String>>,
    /// Semicolon-separated ordered month names, index 0 = January.
    #[serde(default)]
    pub mon: HashMap<String, Vec<String>>,
    /// Semicolon-separated `"am-text;pm-text"` pairs.
    #[serde(default)]
    pub am_pm: HashMap<String, Vec<String>>,
    /// Semicolon-separated ordered alternate numeral glyphs.
    #[serde(default)]
    pub alt_digits: HashMap<String, Vec<String>>,
    /// Era definitions. Parsed and retained, but never consulted by the
    /// pattern extractor (see the "era handling" design note in DESIGN.md).
    #[serde(default)]
    pub era: HashMap<String, Vec<String>>,
}

impl LocaleSet {
    /// Load a locale set from a JSON-formatted stream, such as one produced
    /// by an `lc_time`-style extraction utility.
    pub fn from_json<R: Read>(mut reader: R) -> Result<Self, CorpusError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_json_str(&buf)
    }

    /// As [`LocaleSet::from_json`], but from an in-memory string.
    pub fn from_json_str(s: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a locale set bundled with this crate. Presently only the
    /// `"glibc"` provider is bundled.
    pub fn bundled(provider: &str) -> Result<Self, CorpusError> {
        match provider {
            "glibc" => Self::from_json_str(GLIBC_CORPUS),
            other => Err(CorpusError::UnknownProvider(other.to_string())),
        }
    }

    /// Load the default bundled locale set (the `"glibc"` provider).
    pub fn default_bundled() -> Self {
        Self::bundled("glibc").expect("bundled glibc corpus is valid JSON")
    }

    /// An empty locale set: no formats, no keywords, consistent with `parse`
    /// still working in pure format-shape inference mode.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let parsed = LocaleSet::from_json_str(r#"{"formats": {}, "nonsense": 123}"#).unwrap();
        assert!(parsed.formats.is_empty());
    }

    #[test]
    fn absent_keys_default_to_empty() {
        let parsed = LocaleSet::from_json_str("{}").unwrap();
        assert!(parsed.day.is_empty());
        assert!(parsed.mon.is_empty());
        assert!(parsed.am_pm.is_empty());
        assert!(parsed.alt_digits.is_empty());
        assert!(parsed.era.is_empty());
    }

    #[test]
    fn malformed_json_is_a_load_time_error() {
        let err = LocaleSet::from_json_str("{ this is not json").unwrap_err();
        assert!(matches!(err, CorpusError::Json(_)));
    }

    #[test]
    fn bundled_glibc_corpus_parses() {
        let locale_set = LocaleSet::bundled("glibc").unwrap();
        assert!(!locale_set.mon.is_empty());
        assert!(!locale_set.day.is_empty());
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let err = LocaleSet::bundled("nonexistent").unwrap_err();
        assert!(matches!(err, CorpusError::UnknownProvider(_)));
    }
}
