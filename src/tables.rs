//! The pattern extractor (component C): turns a [`LocaleSet`] corpus plus a
//! timezone-name provider into the three derived lookup tables the search
//! engine actually runs against.

use std::collections::HashMap;

use crate::corpus::LocaleSet;
use crate::intern::{LocaleIds, LocaleInterner};
use crate::specifier::Specifier;
use crate::timezone::TimezoneNameProvider;

/// One entry in a derived table: a conversion specifier this literal string
/// can denote, together with the locales in which that holds (empty =
/// universal).
pub type TableEntry = (Specifier, LocaleIds);

/// A case-folded-literal -> `(specifier, locales)*` lookup table. Shared
/// shape for `keywords`, `prefixes`, and `suffixes`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: HashMap<String, Vec<TableEntry>>,
}

impl Table {
    fn new() -> Self {
        Self::default()
    }

    /// Record that `specifier` holds for `locales` under `word`, merging
    /// into any existing entry for the same `(word, specifier)` pair.
    fn record(&mut self, interner: &LocaleInterner, word: &str, specifier: Specifier, locales: LocaleIds) {
        let slot = self.entries.entry(word.to_string()).or_default();
        if let Some((_, existing)) = slot.iter_mut().find(|(spec, _)| *spec == specifier) {
            *existing = interner.union([existing.clone(), locales]);
        } else {
            slot.push((specifier, locales));
        }
    }

    /// Look up every `(specifier, locales)` pair recorded for a literal.
    /// Callers are expected to have already case-folded `word`.
    pub fn get(&self, word: &str) -> &[TableEntry] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every literal string this table recognizes, longest first. Used by
    /// the segmenter to build its master regex with greedy longest-match
    /// alternation.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The three derived tables, plus the interner that owns every locale set
/// they reference.
pub struct PatternTables {
    pub keywords: Table,
    pub prefixes: Table,
    pub suffixes: Table,
    /// Case-folded alternate-digit glyph -> `(ordinal, locales)*`. Kept
    /// alongside `keywords` because a glyph's *value* is its position in the
    /// corpus's `alt_digits` list, which the generic `Table` shape (one
    /// specifier per entry) can't carry — the specifier itself is left
    /// ambiguous on purpose (see DESIGN.md's alternate-digit note).
    pub alt_digit_values: HashMap<String, Vec<(u8, LocaleIds)>>,
    /// Case-folded weekday name -> `(day_of_week, locales)*`, 0 = Sunday,
    /// recovered the same way as `alt_digit_values`.
    pub weekday_values: HashMap<String, Vec<(u8, LocaleIds)>>,
    /// Case-folded month name -> `(month_of_year, locales)*`, 0 = January.
    pub month_values: HashMap<String, Vec<(u8, LocaleIds)>>,
    /// Case-folded am/pm word -> `(is_pm, locales)*`, recovered the same way
    /// as `alt_digit_values`: the corpus only discloses which half of the
    /// pair a word is by its position in `"am-text;pm-text"`.
    pub am_pm_values: HashMap<String, Vec<(bool, LocaleIds)>>,
    interner: LocaleInterner,
}

/// Literals so common across locales that they carry no locale-distinguishing
/// power and are simply allowed everywhere.
const GLOBAL_PREFIXES: &[(&str, &[Specifier])] = &[
    (":", &[Specifier::Minute, Specifier::Second]),
    (
        "/",
        &[Specifier::Century, Specifier::Year, Specifier::Month, Specifier::Day],
    ),
    (
        "-",
        &[Specifier::Century, Specifier::Year, Specifier::Month, Specifier::Day],
    ),
    ("utc", &[Specifier::ZoneOffset]),
    ("t", &[Specifier::Hour]),
];

const GLOBAL_SUFFIXES: &[(&str, &[Specifier])] = &[
    (":", &[Specifier::Hour, Specifier::Minute]),
    ("/", &[Specifier::Year, Specifier::Month, Specifier::Day]),
    ("-", &[Specifier::Year, Specifier::Month, Specifier::Day]),
    ("t", &[Specifier::Day]),
];

impl PatternTables {
    /// Build the derived tables from a raw corpus and a timezone-name
    /// provider.
    pub fn build(corpus: &LocaleSet, timezones: &dyn TimezoneNameProvider) -> Self {
        let interner = LocaleInterner::new();
        let mut keywords = Table::new();
        let mut prefixes = Table::new();
        let mut suffixes = Table::new();

        Self::emit_keywords(&interner, &mut keywords, &corpus.day, Specifier::Weekday);
        Self::emit_keywords(&interner, &mut keywords, &corpus.mon, Specifier::MonthName);
        Self::emit_keywords(&interner, &mut keywords, &corpus.am_pm, Specifier::AmPm);
        Self::emit_keywords(&interner, &mut keywords, &corpus.alt_digits, Specifier::AltDigit);
        let alt_digit_values = Self::emit_ordinal_values(&interner, &corpus.alt_digits);
        let weekday_values = Self::emit_ordinal_values(&interner, &corpus.day);
        let month_values = Self::emit_ordinal_values(&interner, &corpus.mon);
        let mut am_pm_values = Self::emit_am_pm_values(&interner, &corpus.am_pm);

        Self::merge_am_pm(&interner, &mut keywords, &mut am_pm_values);

        for zone in timezones.timezones() {
            for name in timezones.short_names(&zone) {
                if name.starts_with('+') || name.starts_with('-') {
                    continue;
                }
                let folded = name.to_lowercase();
                keywords.record(&interner, &folded, Specifier::ZoneName, interner.universal());
            }
        }

        Self::emit_prefix_suffix(&interner, &mut prefixes, &mut suffixes, &corpus.formats);

        for (pattern, specifiers) in GLOBAL_PREFIXES {
            for specifier in *specifiers {
                prefixes.record(&interner, pattern, *specifier, interner.universal());
            }
        }
        for (pattern, specifiers) in GLOBAL_SUFFIXES {
            for specifier in *specifiers {
                suffixes.record(&interner, pattern, *specifier, interner.universal());
            }
        }

        Self {
            keywords,
            prefixes,
            suffixes,
            alt_digit_values,
            weekday_values,
            month_values,
            am_pm_values,
            interner,
        }
    }

    /// `locale_interner` — exposed so the search engine can intern locale
    /// sets it computes on the fly (intersections, single-locale wraps) with
    /// the same table.
    pub fn interner(&self) -> &LocaleInterner {
        &self.interner
    }

    /// Split semicolon-separated ordered lists (`day`, `mon`, `am_pm`,
    /// `alt_digits`) and record each trimmed, case-folded word as a keyword.
    /// `alt_digits` carries the decoded ordinal via its index; that index is
    /// recovered later by callers that need it (see `crate::hypothesis`),
    /// so here we only record that the word denotes *some* alt-digit.
    fn emit_keywords(
        interner: &LocaleInterner,
        keywords: &mut Table,
        source: &HashMap<String, Vec<String>>,
        specifier: Specifier,
    ) {
        for (value, locales) in source {
            let locale_set = interner.locale_set(locales);
            for word in value.split(';') {
                let folded = word.trim().to_lowercase();
                if folded.is_empty() {
                    continue;
                }
                keywords.record(interner, &folded, specifier, locale_set.clone());
            }
        }
    }

    /// Record each semicolon-separated entry's 0-based position alongside
    /// the locales that use it. Shared by `day`, `mon`, and `alt_digits`,
    /// which all carry their decoded value only as list position.
    fn emit_ordinal_values(
        interner: &LocaleInterner,
        source: &HashMap<String, Vec<String>>,
    ) -> HashMap<String, Vec<(u8, LocaleIds)>> {
        let mut values: HashMap<String, Vec<(u8, LocaleIds)>> = HashMap::new();
        for (value, locales) in source {
            let locale_set = interner.locale_set(locales);
            for (ordinal, word) in value.split(';').enumerate() {
                let folded = word.trim().to_lowercase();
                if folded.is_empty() {
                    continue;
                }
                let Ok(ordinal) = u8::try_from(ordinal) else { continue };
                let slot = values.entry(folded).or_default();
                if let Some((_, existing)) = slot.iter_mut().find(|(o, _)| *o == ordinal) {
                    *existing = interner.union([existing.clone(), locale_set.clone()]);
                } else {
                    slot.push((ordinal, locale_set.clone()));
                }
            }
        }
        values
    }

    /// Record each am/pm word's half (`false` = am, `true` = pm) alongside
    /// the locales that use it.
    fn emit_am_pm_values(
        interner: &LocaleInterner,
        source: &HashMap<String, Vec<String>>,
    ) -> HashMap<String, Vec<(bool, LocaleIds)>> {
        let mut values: HashMap<String, Vec<(bool, LocaleIds)>> = HashMap::new();
        for (value, locales) in source {
            let locale_set = interner.locale_set(locales);
            for (index, word) in value.split(';').enumerate() {
                let folded = word.trim().to_lowercase();
                if folded.is_empty() {
                    continue;
                }
                let is_pm = index % 2 == 1;
                let slot = values.entry(folded).or_default();
                if let Some((_, existing)) = slot.iter_mut().find(|(pm, _)| *pm == is_pm) {
                    *existing = interner.union([existing.clone(), locale_set.clone()]);
                } else {
                    slot.push((is_pm, locale_set.clone()));
                }
            }
        }
        values
    }

    /// Unify `am`/`a.m.` and `pm`/`p.m.` under `%p`.
    fn merge_am_pm(
        interner: &LocaleInterner,
        keywords: &mut Table,
        am_pm_values: &mut HashMap<String, Vec<(bool, LocaleIds)>>,
    ) {
        for (group, is_pm) in [(["am", "a.m."], false), (["pm", "p.m."], true)] {
            let merged = interner.union(
                group
                    .iter()
                    .flat_map(|word| keywords.get(word).iter().map(|(_, locales)| locales.clone())),
            );
            if merged.is_empty() {
                continue;
            }
            for word in group {
                keywords.record(interner, word, Specifier::AmPm, merged.clone());
                let slot = am_pm_values.entry(word.to_string()).or_default();
                if let Some((_, existing)) = slot.iter_mut().find(|(pm, _)| *pm == is_pm) {
                    *existing = interner.union([existing.clone(), merged.clone()]);
                } else {
                    slot.push((is_pm, merged.clone()));
                }
            }
        }
    }

    /// For each `(format_string, locale_set)`, walk the literal/specifier
    /// sequence and record every interior literal as a suffix of the
    /// specifier to its left and a prefix of the specifier to its right.
    fn emit_prefix_suffix(
        interner: &LocaleInterner,
        prefixes: &mut Table,
        suffixes: &mut Table,
        formats: &HashMap<String, Vec<String>>,
    ) {
        for (format, locales) in formats {
            let locale_set = interner.locale_set(locales);
            let tokens = crate::segment::split_conversion_specifiers(format);
            for window in tokens.windows(3) {
                let (left, literal, right) = match window {
                    [a, b, c] => (a, b, c),
                    _ => unreachable!(),
                };
                let (Some(left_spec), Some(literal), Some(right_spec)) =
                    (left.as_specifier(), literal.as_literal(), right.as_specifier())
                else {
                    continue;
                };
                if literal.is_empty() {
                    continue;
                }
                // Recognised by the word itself, not by surrounding context.
                if !matches!(
                    left_spec,
                    Specifier::Weekday | Specifier::MonthName | Specifier::AmPm
                ) {
                    suffixes.record(interner, &literal.to_lowercase(), left_spec, locale_set.clone());
                }
                if !matches!(
                    right_spec,
                    Specifier::Weekday | Specifier::MonthName | Specifier::AmPm
                ) {
                    prefixes.record(interner, &literal.to_lowercase(), right_spec, locale_set.clone());
                }
            }
        }
    }
}

impl std::fmt::Debug for PatternTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternTables")
            .field("keywords", &self.keywords.entries.len())
            .field("prefixes", &self.prefixes.entries.len())
            .field("suffixes", &self.suffixes.entries.len())
            .finish()
    }
}

#[allow(dead_code)]
fn assert_not_empty(table: &Table) -> bool {
    !table.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::NoTimezoneNames;
    use std::collections::HashMap;

    fn corpus_with(formats: &[(&str, &[&str])]) -> LocaleSet {
        let mut map = HashMap::new();
        for (fmt, locales) in formats {
            map.insert(fmt.to_string(), locales.iter().map(|s| s.to_string()).collect());
        }
        LocaleSet {
            formats: map,
            ..LocaleSet::empty()
        }
    }

    #[test]
    fn prefix_and_suffix_extraction_matches_vietnamese_example() {
        let corpus = corpus_with(&[("ngày %d tháng %m năm %Y", &["vi_VN"])]);
        let tables = PatternTables::build(&corpus, &NoTimezoneNames);
        let month_prefixes: Vec<_> = tables
            .prefixes
            .get("tháng")
            .iter()
            .map(|(spec, _)| *spec)
            .collect();
        assert!(month_prefixes.contains(&Specifier::Month));
        let year_prefixes: Vec<_> = tables.prefixes.get("năm").iter().map(|(spec, _)| *spec).collect();
        assert!(year_prefixes.contains(&Specifier::Year));
    }

    #[test]
    fn word_recognised_specifiers_are_skipped_for_surrounding_context() {
        let corpus = corpus_with(&[("%a, %Y.eko %bren %da", &["eu_ES"])]);
        let tables = PatternTables::build(&corpus, &NoTimezoneNames);
        assert!(tables.suffixes.get("eko").iter().any(|(s, _)| *s == Specifier::Year));
        assert!(tables.prefixes.get("ren").iter().any(|(s, _)| *s == Specifier::Day));
        // "eko" also sits directly in front of the month name, and "ren" directly
        // behind it, but a weekday/month/am-pm specifier is recognised by the word
        // itself, not by the literal next to it, so neither contributes a hint on
        // that side.
        assert!(tables.prefixes.get("eko").is_empty());
        assert!(tables.suffixes.get("ren").is_empty());
    }

    #[test]
    fn am_pm_variants_merge() {
        let mut am_pm = HashMap::new();
        am_pm.insert("am;pm".to_string(), vec!["en_US".to_string()]);
        am_pm.insert("a.m.;p.m.".to_string(), vec!["fr_CA".to_string()]);
        let corpus = LocaleSet {
            am_pm,
            ..LocaleSet::empty()
        };
        let tables = PatternTables::build(&corpus, &NoTimezoneNames);
        let am_locales: Vec<_> = tables
            .keywords
            .get("am")
            .iter()
            .find(|(s, _)| *s == Specifier::AmPm)
            .map(|(_, l)| l.iter().map(|x| x.to_string()).collect::<Vec<_>>())
            .unwrap();
        assert!(am_locales.contains(&"en_US".to_string()));
        assert!(am_locales.contains(&"fr_CA".to_string()));
    }

    #[test]
    fn global_patterns_are_universal() {
        let tables = PatternTables::build(&LocaleSet::empty(), &NoTimezoneNames);
        let colon_prefix = tables.prefixes.get(":");
        assert!(colon_prefix.iter().any(|(s, l)| *s == Specifier::Minute && l.is_empty()));
    }

    #[test]
    fn timezone_short_names_become_universal_z_keywords() {
        let provider = crate::timezone::StaticTimezoneNames::new()
            .with_zone("America/Los_Angeles", ["PST", "PDT", "-0800"]);
        let tables = PatternTables::build(&LocaleSet::empty(), &provider);
        let pst = tables.keywords.get("pst");
        assert!(pst.iter().any(|(s, l)| *s == Specifier::ZoneName && l.is_empty()));
        assert!(tables.keywords.get("-0800").is_empty());
    }
}
