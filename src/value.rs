//! The decoded date/time value a search result carries, when its assigned
//! fields determine one.

use time::{Date, PrimitiveDateTime, Time};

/// A value decoded from a complete assignment's date and/or time fields.
/// `None` of these is returned when a result's fields don't fully determine
/// either a date or a time; pure-format inference without a decoded value
/// is a legitimate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedValue {
    Date(Date),
    Time(Time),
    DateTime(PrimitiveDateTime),
}

impl DecodedValue {
    /// Combine an optional date and optional time into whichever variant
    /// their presence implies. Returns `None` if neither is present.
    pub fn combine(date: Option<Date>, time: Option<Time>) -> Option<Self> {
        match (date, time) {
            (Some(date), Some(time)) => Some(DecodedValue::DateTime(PrimitiveDateTime::new(date, time))),
            (Some(date), None) => Some(DecodedValue::Date(date)),
            (None, Some(time)) => Some(DecodedValue::Time(time)),
            (None, None) => None,
        }
    }

    pub fn date(self) -> Option<Date> {
        match self {
            DecodedValue::Date(d) => Some(d),
            DecodedValue::DateTime(dt) => Some(dt.date()),
            DecodedValue::Time(_) => None,
        }
    }

    pub fn time(self) -> Option<Time> {
        match self {
            DecodedValue::Time(t) => Some(t),
            DecodedValue::DateTime(dt) => Some(dt.time()),
            DecodedValue::Date(_) => None,
        }
    }
}
