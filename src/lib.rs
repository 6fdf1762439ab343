//! Infers the `strftime`/`strptime` conversion-specifier format (and, where
//! the input determines one, a decoded value) that could have produced an
//! arbitrary date/time string, while narrowing the set of locales
//! consistent with that reading.
//!
//! The entry point is [`DateParser`]: build one from an optional
//! [`LocaleSet`] corpus (bundled glibc-derived sample data is available via
//! [`LocaleSet::default_bundled`]), then call [`DateParser::parse`].
//!
//! ```
//! use strftime_infer::{DateParser, LocaleSet};
//!
//! let parser = DateParser::new(Some(LocaleSet::default_bundled()));
//! let candidates = parser.parse("2018-05-05");
//! assert!(candidates.iter().any(|c| c.format == "%Y-%m-%d"));
//! ```
//!
//! This crate never looks at the system clock or filesystem once a
//! [`DateParser`] is built: corpus loading is the only I/O, and `parse`
//! itself is pure and infallible.

mod assemble;
mod calendar;
mod corpus;
mod error;
mod hypothesis;
mod intern;
mod parser;
mod search;
mod segment;
mod specifier;
mod tables;
mod timezone;
mod value;

pub use assemble::ParsedCandidate;
pub use corpus::LocaleSet;
pub use error::CorpusError;
pub use parser::DateParser;
pub use specifier::{Category, Specifier};
pub use timezone::{NoTimezoneNames, StaticTimezoneNames, TimezoneNameProvider};
pub use value::DecodedValue;

cfg_if::cfg_if! {
    if #[cfg(feature = "timezone_name")] {
        pub use timezone::SystemTimezoneNames;
    }
}
