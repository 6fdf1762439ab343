//! The driver / public API (component H): wires the pattern extractor,
//! segmenter, hypothesis generator, search engine, and result assembler
//! together behind one entry point.

use crate::assemble::{self, ParsedCandidate};
use crate::corpus::LocaleSet;
use crate::hypothesis;
use crate::search;
use crate::segment::Segmenter;
use crate::tables::PatternTables;
use crate::timezone::{NoTimezoneNames, TimezoneNameProvider};

/// Infers candidate `strftime`/`strptime` formats (and, where determined, a
/// decoded value and narrowed locale set) for arbitrary date/time strings.
///
/// Immutable after construction, so a `DateParser` is `Send + Sync` and safe
/// to share across threads without locking: building it does all the work
/// (compiling the derived tables and the segmenter's master regex), and
/// `parse` only reads.
pub struct DateParser {
    tables: PatternTables,
    segmenter: Segmenter,
}

impl DateParser {
    /// Build a parser from an optional locale corpus. `None` builds an
    /// empty corpus, which still supports pure format-shape inference (no
    /// locale-bearing keywords, only numeric and global-pattern matches).
    /// Uses [`NoTimezoneNames`]; use [`DateParser::with_timezones`] to wire
    /// up a real timezone-abbreviation source.
    pub fn new(locale_set: Option<LocaleSet>) -> Self {
        Self::with_timezones(locale_set, &NoTimezoneNames)
    }

    /// As [`DateParser::new`], but pulling `%Z` keywords from a
    /// caller-supplied [`TimezoneNameProvider`].
    pub fn with_timezones(locale_set: Option<LocaleSet>, timezones: &dyn TimezoneNameProvider) -> Self {
        let locale_set = locale_set.unwrap_or_else(LocaleSet::empty);
        let span = tracing::debug_span!("build_date_parser");
        let _entered = span.enter();

        let tables = PatternTables::build(&locale_set, timezones);
        let segmenter = Segmenter::build(&tables);
        tracing::debug!(
            keywords = tables.keywords.len(),
            prefixes = tables.prefixes.len(),
            suffixes = tables.suffixes.len(),
            "parser built"
        );
        Self { tables, segmenter }
    }

    /// Infer every maximal-scoring reading of `input`. Never errors:
    /// unparseable input, or input with no candidate segments at all,
    /// yields an empty `Vec` rather than `Err` — ambiguity is signalled by
    /// multiple returned candidates, unparseability by none.
    pub fn parse(&self, input: &str) -> Vec<ParsedCandidate> {
        let tokens = self.segmenter.segment(input);
        let candidates = hypothesis::generate(&self.tables, &tokens);
        let universal = self.tables.interner().universal();
        let outcomes = search::search(&candidates, &universal);
        tracing::trace!(
            candidates = candidates.len(),
            outcomes = outcomes.len(),
            "parse complete"
        );
        assemble::assemble_all(&tokens, &candidates, &outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DecodedValue;
    use time::macros::date;

    #[test]
    fn empty_input_yields_no_candidates() {
        let parser = DateParser::new(None);
        assert!(parser.parse("").is_empty());
    }

    #[test]
    fn nonsense_input_with_no_matching_segments_yields_nothing() {
        let parser = DateParser::new(None);
        assert!(parser.parse("   ").is_empty());
    }

    #[test]
    fn iso_date_round_trips_through_the_public_api() {
        let parser = DateParser::new(None);
        let results = parser.parse("2018-05-05");
        assert!(results
            .iter()
            .any(|r| r.format == "%Y-%m-%d" && r.value == Some(DecodedValue::Date(date!(2018 - 05 - 05)))));
    }

    #[test]
    fn parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DateParser>();
    }
}

#[cfg(test)]
mod round_trip_laws {
    //! Formatting a value and parsing the result back should always surface
    //! the original reading among the candidates, even when other readings
    //! tie with it.
    use super::*;
    use crate::value::DecodedValue;
    use proptest::prelude::*;
    use time::{Date, Month, Time};

    proptest! {
        #[test]
        fn iso_date_round_trips(year in 1900i32..=2099, month in 1u8..=12, day in 1u8..=28) {
            let date = Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap();
            let text = format!("{year:04}-{month:02}-{day:02}");
            let parser = DateParser::new(None);
            let results = parser.parse(&text);
            prop_assert!(results.iter().any(|r| r.value == Some(DecodedValue::Date(date))));
        }

        #[test]
        fn clock_time_round_trips(hour in 0u8..=23, minute in 0u8..=59, second in 0u8..=59) {
            let clock = Time::from_hms(hour, minute, second).unwrap();
            let text = format!("{hour:02}:{minute:02}:{second:02}");
            let parser = DateParser::new(None);
            let results = parser.parse(&text);
            prop_assert!(results.iter().any(|r| r.value == Some(DecodedValue::Time(clock))));
        }
    }
}
