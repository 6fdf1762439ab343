//! The segmenter (component D), plus the small conversion-specifier
//! tokenizer the pattern extractor (`crate::tables`) uses to walk sample
//! format strings.
//!
//! These are two different jobs over two different kinds of string: one
//! splits a `strftime`-style *format string* (`"%a, %Y.eko %bren %da"`) into
//! alternating literal/specifier tokens; the other splits an arbitrary
//! *input string* (`"2018-05-05"`) into alternating literal/candidate
//! segments using the master regex built from the derived tables.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::specifier::Specifier;
use crate::tables::PatternTables;

/// One token of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatToken {
    Literal(String),
    Specifier(Specifier),
}

impl FormatToken {
    pub fn as_specifier(&self) -> Option<Specifier> {
        match self {
            FormatToken::Specifier(s) => Some(*s),
            FormatToken::Literal(_) => None,
        }
    }

    /// The literal text, trimmed. `None` for specifier tokens.
    pub fn as_literal(&self) -> Option<String> {
        match self {
            FormatToken::Literal(s) => Some(s.trim().to_string()),
            FormatToken::Specifier(_) => None,
        }
    }
}

/// Characters that surround a conversion specifier in some sample formats
/// without carrying any prefix/suffix evidence of their own: whitespace,
/// the right-to-left embedding/pop marks, parens, `.`, and a wide set of
/// script-specific comma glyphs. Absorbed into the specifier match itself
/// so they never get recorded as literal context.
const IGNORABLE: &str = r"[\s\u{202B}\u{202C}().,\u{00B7}\u{055D}\u{060C}\u{07F8}\u{1363}\u{1802}\u{1808}\u{2E41}\u{2E4C}\u{3001}\u{A4FE}\u{A60D}\u{A6F5}\u{FF0C}]*";

/// An ignorable run, `%` + optional flag (`-_0^#`) + optional width digits +
/// optional `E`/`O` modifier + a single letter, then another ignorable run.
fn specifier_regex() -> &'static Regex {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!("{IGNORABLE}%[-_0^#]?[0-9]*([EO])?([A-Za-z]){IGNORABLE}"))
            .expect("conversion specifier regex is well-formed")
    });
    &RE
}

/// Split a `strftime`-style format string into alternating literal and
/// specifier tokens (the pattern extractor's walk over `formats`). An
/// `%O` modifier always yields [`Specifier::AltDigit`], regardless of the
/// letter that follows it: the raw alt-digit glyph alone doesn't say which
/// field it names, so disambiguation is deferred to the hypothesis stage.
pub fn split_conversion_specifiers(format: &str) -> Vec<FormatToken> {
    let re = specifier_regex();
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(format) {
        let whole = caps.get(0).expect("group 0 always matches");
        if whole.start() > last {
            tokens.push(FormatToken::Literal(format[last..whole.start()].to_string()));
        }
        let modifier = caps.get(1).map(|m| m.as_str());
        let letter = caps.get(2).expect("letter group is mandatory").as_str();
        let specifier = if modifier == Some("O") {
            Some(Specifier::AltDigit)
        } else {
            letter.chars().next().and_then(Specifier::fold)
        };
        if let Some(specifier) = specifier {
            tokens.push(FormatToken::Specifier(specifier));
        } else {
            // Not a conversion specifier we model; keep it as literal text
            // so it still contributes to surrounding prefix/suffix context.
            tokens.push(FormatToken::Literal(whole.as_str().to_string()));
        }
        last = whole.end();
    }
    if last < format.len() {
        tokens.push(FormatToken::Literal(format[last..].to_string()));
    }
    tokens
}

/// One token of a segmented input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputToken {
    /// Text the segmenter has no hypothesis for; always kept as literal
    /// output text.
    Literal(String),
    /// Text that matched the master regex: a numeric run, a signed offset,
    /// or a known keyword/prefix/suffix literal.
    Candidate(String),
}

/// The compiled master regex used to split input strings into candidate
/// segments (component D). Built once per [`crate::parser::DateParser`].
pub struct Segmenter {
    master: Regex,
}

impl Segmenter {
    /// Build the master regex from every literal the derived tables know
    /// about, plus the two numeric shapes. Alternatives are
    /// sorted longest-first: `regex`'s alternation takes the first
    /// left-to-right match at a given start position rather than the
    /// longest, so ordering here is load-bearing.
    pub fn build(tables: &PatternTables) -> Self {
        let mut literals: Vec<&str> = tables
            .keywords
            .literals()
            .chain(tables.prefixes.literals())
            .chain(tables.suffixes.literals())
            .filter(|s| !s.is_empty())
            .unique()
            .collect();
        literals.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut alternatives = vec![r"[+-]\d{4}".to_string(), r"\d{1,2}".to_string()];
        alternatives.extend(literals.iter().map(|l| regex::escape(l)));
        let pattern = alternatives.join("|");

        let master = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .expect("master regex built from escaped literals is well-formed");
        Self { master }
    }

    /// Collapse whitespace, then split into alternating literal/candidate
    /// tokens. Empty input yields an empty token list.
    pub fn segment(&self, input: &str) -> Vec<InputToken> {
        let collapsed = collapse_whitespace(input);
        if collapsed.is_empty() {
            return Vec::new();
        }
        let mut tokens = Vec::new();
        let mut last = 0;
        for m in self.master.find_iter(&collapsed) {
            if m.start() > last {
                tokens.push(InputToken::Literal(collapsed[last..m.start()].to_string()));
            }
            tokens.push(InputToken::Candidate(m.as_str().to_string()));
            last = m.end();
        }
        if last < collapsed.len() {
            tokens.push(InputToken::Literal(collapsed[last..].to_string()));
        }
        tokens
    }
}

/// Collapse every run of Unicode whitespace to a single ASCII space.
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_space = false;
    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::LocaleSet;
    use crate::timezone::NoTimezoneNames;

    #[test]
    fn splits_literal_and_specifier_tokens() {
        let tokens = split_conversion_specifiers("%a, %Y.eko %bren %da");
        assert_eq!(
            tokens,
            vec![
                FormatToken::Specifier(Specifier::Weekday),
                FormatToken::Specifier(Specifier::Year),
                FormatToken::Literal("eko".to_string()),
                FormatToken::Specifier(Specifier::MonthName),
                FormatToken::Literal("ren".to_string()),
                FormatToken::Specifier(Specifier::Day),
                FormatToken::Literal("a".to_string()),
            ]
        );
    }

    #[test]
    fn alt_modifier_always_yields_alt_digit() {
        let tokens = split_conversion_specifiers("%Oy%Od");
        assert_eq!(
            tokens,
            vec![
                FormatToken::Specifier(Specifier::AltDigit),
                FormatToken::Specifier(Specifier::AltDigit),
            ]
        );
    }

    #[test]
    fn collapses_internal_whitespace_and_trims_ends() {
        assert_eq!(collapse_whitespace("  2018  -\t05-05  "), "2018 -05-05");
    }

    #[test]
    fn segments_plain_numeric_date() {
        let tables = PatternTables::build(&LocaleSet::empty(), &NoTimezoneNames);
        let segmenter = Segmenter::build(&tables);
        let tokens = segmenter.segment("2018-05-05");
        assert_eq!(
            tokens,
            vec![
                InputToken::Candidate("20".to_string()),
                InputToken::Candidate("18".to_string()),
                InputToken::Literal("-".to_string()),
                InputToken::Candidate("05".to_string()),
                InputToken::Literal("-".to_string()),
                InputToken::Candidate("05".to_string()),
            ]
        );
    }

    #[test]
    fn segments_signed_offset_as_one_token() {
        let tables = PatternTables::build(&LocaleSet::empty(), &NoTimezoneNames);
        let segmenter = Segmenter::build(&tables);
        let tokens = segmenter.segment("12:00:00 +0900");
        assert!(tokens.contains(&InputToken::Candidate("+0900".to_string())));
    }

    #[test]
    fn keyword_literal_beats_generic_alternation_order() {
        let mut day = std::collections::HashMap::new();
        day.insert(
            "Sunday;Monday;Tuesday;Wednesday;Thursday;Friday;Saturday".to_string(),
            vec!["en_US".to_string()],
        );
        let corpus = LocaleSet {
            day,
            ..LocaleSet::empty()
        };
        let tables = PatternTables::build(&corpus, &NoTimezoneNames);
        let segmenter = Segmenter::build(&tables);
        let tokens = segmenter.segment("Monday 5");
        assert_eq!(tokens[0], InputToken::Candidate("Monday".to_string()));
    }

    #[test]
    fn empty_input_segments_to_nothing() {
        let tables = PatternTables::build(&LocaleSet::empty(), &NoTimezoneNames);
        let segmenter = Segmenter::build(&tables);
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("   ").is_empty());
    }
}
