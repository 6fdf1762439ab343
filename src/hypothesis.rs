//! The per-segment hypothesis generator (component E): for each candidate
//! segment the segmenter found, enumerate every `(specifier, value, locales,
//! hints)` it could plausibly mean.

use crate::intern::LocaleIds;
use crate::segment::InputToken;
use crate::specifier::Specifier;
use crate::tables::{PatternTables, Table};

/// One possible interpretation of a candidate segment.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub specifier: Specifier,
    /// The decoded numeric value, where the specifier carries one:
    /// `Century`/`Year`/`Month`/`Day`/`Hour`/`Minute`/`Second` carry the
    /// parsed integer; `AmPm` carries `0` (am) or `1` (pm); `Weekday`,
    /// `MonthName`, `ZoneName` carry `0` (the value lives in the matched
    /// text, not here); `ZoneOffset` carries the signed minute-of-offset
    /// total.
    pub value: i64,
    /// The locales this assignment's evidence is drawn from. Empty means
    /// universal (numeric tokens, global patterns).
    pub locales: LocaleIds,
    /// Non-`None` when the literal immediately before this segment is a
    /// known prefix of this specifier in some locale.
    pub prefix_hint: Option<LocaleIds>,
    /// Non-`None` when the literal immediately after this segment is a
    /// known suffix of this specifier in some locale.
    pub suffix_hint: Option<LocaleIds>,
}

/// A candidate segment together with every assignment it could resolve to.
/// A segment with an empty `assignments` list can only remain a literal.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub assignments: Vec<Assignment>,
}

/// Generate hypotheses for every candidate segment in `tokens`, in
/// left-to-right order. The returned `Vec`'s index is a candidate's
/// "position" as referenced by the search engine's ordering constraints.
pub fn generate(tables: &PatternTables, tokens: &[InputToken]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        if let InputToken::Candidate(text) = token {
            let prev = previous_literal(tokens, index);
            let next = next_literal(tokens, index);
            let assignments = hypothesize(tables, text, prev.as_deref(), next.as_deref());
            candidates.push(Candidate { text: text.clone(), assignments });
        }
    }
    candidates
}

fn previous_literal(tokens: &[InputToken], index: usize) -> Option<String> {
    match tokens.get(index.checked_sub(1)?)? {
        InputToken::Literal(s) => Some(s.clone()),
        InputToken::Candidate(_) => None,
    }
}

fn next_literal(tokens: &[InputToken], index: usize) -> Option<String> {
    match tokens.get(index + 1)? {
        InputToken::Literal(s) => Some(s.clone()),
        InputToken::Candidate(_) => None,
    }
}

fn hint_for(table: &Table, literal: Option<&str>, specifier: Specifier) -> Option<LocaleIds> {
    let folded = literal?.trim().to_lowercase();
    if folded.is_empty() {
        return None;
    }
    table
        .get(&folded)
        .iter()
        .find(|(s, _)| *s == specifier)
        .map(|(_, locales)| locales.clone())
}

fn hypothesize(tables: &PatternTables, text: &str, prev: Option<&str>, next: Option<&str>) -> Vec<Assignment> {
    let folded = text.to_lowercase();
    let mut out = Vec::new();

    for (specifier, locales) in tables.keywords.get(&folded) {
        if matches!(
            specifier,
            Specifier::AltDigit | Specifier::AmPm | Specifier::Weekday | Specifier::MonthName
        ) {
            // These need a decoded value the generic keyword table can't
            // carry; handled below from their dedicated value tables.
            continue;
        }
        out.push(Assignment {
            specifier: *specifier,
            value: 0,
            locales: locales.clone(),
            prefix_hint: hint_for(&tables.prefixes, prev, *specifier),
            suffix_hint: hint_for(&tables.suffixes, next, *specifier),
        });
    }

    if let Some(entries) = tables.am_pm_values.get(&folded) {
        for (is_pm, locales) in entries {
            out.push(Assignment {
                specifier: Specifier::AmPm,
                value: *is_pm as i64,
                locales: locales.clone(),
                prefix_hint: hint_for(&tables.prefixes, prev, Specifier::AmPm),
                suffix_hint: hint_for(&tables.suffixes, next, Specifier::AmPm),
            });
        }
    }

    if let Some(entries) = tables.weekday_values.get(&folded) {
        for (day_of_week, locales) in entries {
            out.push(Assignment {
                specifier: Specifier::Weekday,
                value: *day_of_week as i64,
                locales: locales.clone(),
                prefix_hint: hint_for(&tables.prefixes, prev, Specifier::Weekday),
                suffix_hint: hint_for(&tables.suffixes, next, Specifier::Weekday),
            });
        }
    }

    if let Some(entries) = tables.month_values.get(&folded) {
        for (month_index, locales) in entries {
            out.push(Assignment {
                specifier: Specifier::MonthName,
                value: *month_index as i64 + 1,
                locales: locales.clone(),
                prefix_hint: hint_for(&tables.prefixes, prev, Specifier::MonthName),
                suffix_hint: hint_for(&tables.suffixes, next, Specifier::MonthName),
            });
        }
    }

    if let Some(entries) = tables.alt_digit_values.get(&folded) {
        for (ordinal, locales) in entries {
            for specifier in Specifier::NUMERIC {
                out.push(Assignment {
                    specifier,
                    value: *ordinal as i64,
                    locales: locales.clone(),
                    prefix_hint: hint_for(&tables.prefixes, prev, specifier),
                    suffix_hint: hint_for(&tables.suffixes, next, specifier),
                });
            }
        }
    }

    if let Some(value) = parse_signed_offset(text) {
        out.push(Assignment {
            specifier: Specifier::ZoneOffset,
            value,
            locales: tables.interner().universal(),
            prefix_hint: None,
            suffix_hint: None,
        });
        // A signed offset is unambiguous; it's never also a plain digit run
        // or keyword.
        return out;
    }

    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(value) = text.parse::<i64>() {
            for specifier in Specifier::NUMERIC {
                if specifier.accepts_numeric_value(value) {
                    out.push(Assignment {
                        specifier,
                        value,
                        locales: tables.interner().universal(),
                        prefix_hint: hint_for(&tables.prefixes, prev, specifier),
                        suffix_hint: hint_for(&tables.suffixes, next, specifier),
                    });
                }
            }
        }
    }

    out
}

/// Parse a signed four-digit UTC offset token (`+0900`, `-0530`) into total
/// signed minutes. Returns `None` for anything else, including unsigned
/// digit runs (those go through the plain-digit path instead).
fn parse_signed_offset(text: &str) -> Option<i64> {
    let mut chars = text.chars();
    let sign = match chars.next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits = chars.as_str();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = digits[0..2].parse().ok()?;
    let minutes: i64 = digits[2..4].parse().ok()?;
    Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::LocaleSet;
    use crate::timezone::NoTimezoneNames;
    use std::collections::HashMap;

    fn tables_with_mon() -> PatternTables {
        let mut mon = HashMap::new();
        mon.insert(
            "January;February;March;April;May;June;July;August;September;October;November;December"
                .to_string(),
            vec!["en_US".to_string()],
        );
        let corpus = LocaleSet { mon, ..LocaleSet::empty() };
        PatternTables::build(&corpus, &NoTimezoneNames)
    }

    #[test]
    fn plain_digit_generates_all_accepting_specifiers() {
        let tables = PatternTables::build(&LocaleSet::empty(), &NoTimezoneNames);
        let assignments = hypothesize(&tables, "13", None, None);
        let specifiers: Vec<_> = assignments.iter().map(|a| a.specifier).collect();
        assert!(specifiers.contains(&Specifier::Century));
        assert!(specifiers.contains(&Specifier::Year));
        assert!(specifiers.contains(&Specifier::Day));
        assert!(!specifiers.contains(&Specifier::Month));
    }

    #[test]
    fn signed_offset_is_unambiguous() {
        let tables = PatternTables::build(&LocaleSet::empty(), &NoTimezoneNames);
        let assignments = hypothesize(&tables, "+0900", None, None);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].specifier, Specifier::ZoneOffset);
        assert_eq!(assignments[0].value, 540);

        let assignments = hypothesize(&tables, "-0530", None, None);
        assert_eq!(assignments[0].value, -330);
    }

    #[test]
    fn month_name_keyword_matches_case_insensitively() {
        let tables = tables_with_mon();
        let assignments = hypothesize(&tables, "JANUARY", None, None);
        assert!(assignments.iter().any(|a| a.specifier == Specifier::MonthName));
    }

    #[test]
    fn candidates_pick_up_prefix_and_suffix_hints() {
        let mut formats = HashMap::new();
        formats.insert("ngày %d tháng %m năm %Y".to_string(), vec!["vi_VN".to_string()]);
        let corpus = LocaleSet { formats, ..LocaleSet::empty() };
        let tables = PatternTables::build(&corpus, &NoTimezoneNames);
        let assignments = hypothesize(&tables, "2018", Some("năm"), None);
        let year_hypothesis = assignments.iter().find(|a| a.specifier == Specifier::Year).unwrap();
        assert!(year_hypothesis.prefix_hint.is_some());
    }
}
