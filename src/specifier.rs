//! The closed set of conversion-specifier letters this engine reasons about,
//! and the field categories they fold into.
//!
//! The corpus speaks of `%Y` vs `%y`, `%I`/`%k`/`%l` vs `%H`, `%e` vs `%d`,
//! and so on. Internally we fold all of those onto one canonical letter per
//! field so the search engine only ever juggles ten categories. `%C%y` is the
//! one exception: the two are kept distinct until the very end, where an
//! adjacent `C`/`Y` pair collapses into `%Y` (see `crate::assemble`).

use std::fmt;

/// A single conversion-specifier letter, after equivalent-specifier folding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Specifier {
    /// `%C`: the century, `00` upward.
    Century,
    /// `%y` (folded from `%Y`): the year value.
    Year,
    /// `%m`: month of year, `01`-`12`.
    Month,
    /// `%b`/`%h` (folded to the `Month` category, distinct letter): month name.
    MonthName,
    /// `%d` (folded from `%e`): day of month, `01`-`31`.
    Day,
    /// `%a`: weekday name.
    Weekday,
    /// `%H` (folded from `%I`, `%k`, `%l`): hour of day.
    Hour,
    /// `%M`: minute of hour.
    Minute,
    /// `%S`: second of minute.
    Second,
    /// `%p`: AM/PM marker.
    AmPm,
    /// `%z`: signed numeric UTC offset.
    ZoneOffset,
    /// `%Z`: timezone name or abbreviation.
    ZoneName,
    /// `%O`-prefixed alternate-digit numeral. Never reaches the search engine
    /// directly: it is expanded into concrete numeric specifiers up front
    /// (see `crate::hypothesis`).
    AltDigit,
}

impl Specifier {
    /// The POSIX letter this specifier is rendered as in an output format
    /// string.
    pub fn as_char(self) -> char {
        match self {
            Specifier::Century => 'C',
            Specifier::Year => 'y',
            Specifier::Month => 'm',
            Specifier::MonthName => 'b',
            Specifier::Day => 'd',
            Specifier::Weekday => 'a',
            Specifier::Hour => 'H',
            Specifier::Minute => 'M',
            Specifier::Second => 'S',
            Specifier::AmPm => 'p',
            Specifier::ZoneOffset => 'z',
            Specifier::ZoneName => 'Z',
            Specifier::AltDigit => 'O',
        }
    }

    /// Fold a raw corpus/format letter onto its canonical specifier:
    /// `e->d`, `I->H`, `k->H`, `l->H`, `Y->y`.
    pub fn fold(letter: char) -> Option<Specifier> {
        use Specifier::*;
        Some(match letter {
            'C' => Century,
            'y' | 'Y' => Year,
            'm' => Month,
            'b' | 'h' => MonthName,
            'd' | 'e' => Day,
            'a' | 'A' => Weekday,
            'H' | 'I' | 'k' | 'l' => Hour,
            'M' => Minute,
            'S' => Second,
            'p' | 'P' => AmPm,
            'z' => ZoneOffset,
            'Z' => ZoneName,
            'O' => AltDigit,
            _ => return None,
        })
    }

    /// The field category this specifier is assigned under. At most one
    /// segment may be assigned to a given category in a complete assignment.
    pub fn category(self) -> Category {
        match self {
            Specifier::Century => Category::Century,
            Specifier::Year => Category::Year,
            Specifier::Month | Specifier::MonthName => Category::Month,
            Specifier::Day => Category::Day,
            Specifier::Weekday => Category::Weekday,
            Specifier::Hour => Category::Hour,
            Specifier::Minute => Category::Minute,
            Specifier::Second => Category::Second,
            Specifier::AmPm => Category::AmPm,
            Specifier::ZoneOffset | Specifier::ZoneName => Category::Zone,
            Specifier::AltDigit => {
                unreachable!("%O is expanded before categories are assigned")
            }
        }
    }

    /// Whether a plain (unprefixed) numeric token could possibly be this
    /// specifier, given its decoded integer value. Mirrors the value-range
    /// limits fixed in the data model: `S <= 60`, `M <= 59`, `H <= 23`,
    /// `m in [1,12]`, `d in [1,31]`; `C` and `y` accept anything the
    /// segmenter could hand them (at most two digits).
    pub fn accepts_numeric_value(self, value: i64) -> bool {
        match self {
            Specifier::Century | Specifier::Year => true,
            Specifier::Second => value <= 60,
            Specifier::Minute => value <= 59,
            Specifier::Hour => value <= 23,
            Specifier::Day => (1..=31).contains(&value),
            Specifier::Month => (1..=12).contains(&value),
            Specifier::MonthName
            | Specifier::Weekday
            | Specifier::AmPm
            | Specifier::ZoneOffset
            | Specifier::ZoneName
            | Specifier::AltDigit => false,
        }
    }

    /// The complete set of numeric specifiers a candidate segment may ever
    /// resolve to: `C`, `y`, `m`, `d`, `H`, `M`, `S`.
    pub const NUMERIC: [Specifier; 7] = [
        Specifier::Century,
        Specifier::Year,
        Specifier::Month,
        Specifier::Day,
        Specifier::Hour,
        Specifier::Minute,
        Specifier::Second,
    ];
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.as_char())
    }
}

/// A field category: the logical date/time component a segment fills.
/// `MonthName` and `Month` share the `Month` category; `ZoneOffset` and
/// `ZoneName` share the `Zone` category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Century,
    Year,
    Month,
    Day,
    Weekday,
    Hour,
    Minute,
    Second,
    AmPm,
    Zone,
}

impl Category {
    /// All ten field categories, in a fixed, arbitrary but stable order used
    /// wherever we need to iterate "every category".
    pub const ALL: [Category; 10] = [
        Category::Century,
        Category::Year,
        Category::Month,
        Category::Day,
        Category::Weekday,
        Category::Hour,
        Category::Minute,
        Category::Second,
        Category::AmPm,
        Category::Zone,
    ];

    /// Date-bearing categories: `{C, y, m, d, a}`.
    pub fn is_date(self) -> bool {
        matches!(
            self,
            Category::Century | Category::Year | Category::Month | Category::Day | Category::Weekday
        )
    }

    /// The minimal set of date categories that must all be present once any
    /// date category is present: `{y, m, d}`.
    pub fn is_required_date(self) -> bool {
        matches!(self, Category::Year | Category::Month | Category::Day)
    }

    /// Time-bearing categories: `{H, M, S, p, Z}`.
    pub fn is_time(self) -> bool {
        matches!(
            self,
            Category::Hour | Category::Minute | Category::Second | Category::AmPm | Category::Zone
        )
    }

    /// The minimal set of time categories that must all be present once any
    /// time category is present: `{H, M}`.
    pub fn is_required_time(self) -> bool {
        matches!(self, Category::Hour | Category::Minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_collapses_equivalents() {
        assert_eq!(Specifier::fold('e'), Some(Specifier::Day));
        assert_eq!(Specifier::fold('d'), Some(Specifier::Day));
        assert_eq!(Specifier::fold('I'), Some(Specifier::Hour));
        assert_eq!(Specifier::fold('k'), Some(Specifier::Hour));
        assert_eq!(Specifier::fold('l'), Some(Specifier::Hour));
        assert_eq!(Specifier::fold('Y'), Some(Specifier::Year));
        assert_eq!(Specifier::fold('y'), Some(Specifier::Year));
    }

    #[test]
    fn numeric_ranges_are_enforced() {
        assert!(Specifier::Second.accepts_numeric_value(60));
        assert!(!Specifier::Minute.accepts_numeric_value(60));
        assert!(!Specifier::Day.accepts_numeric_value(32));
        assert!(!Specifier::Day.accepts_numeric_value(0));
        assert!(!Specifier::Month.accepts_numeric_value(13));
        assert!(Specifier::Year.accepts_numeric_value(99));
        assert!(Specifier::Century.accepts_numeric_value(99));
    }

    #[test]
    fn categories_share_month_and_zone() {
        assert_eq!(Specifier::Month.category(), Category::Month);
        assert_eq!(Specifier::MonthName.category(), Category::Month);
        assert_eq!(Specifier::ZoneOffset.category(), Category::Zone);
        assert_eq!(Specifier::ZoneName.category(), Category::Zone);
    }
}
