//! Calendar and clock helpers shared by the search engine and result
//! assembler: century inference, weekday validation, and AM/PM hour
//! adjustment.

use time::{Date, Month, Weekday};

/// Build a `time::Date` from a full year, 1-12 month, and 1-31 day, or
/// `None` if that's not a real Gregorian date. Delegates entirely to `time`,
/// which already implements the leap-year and month-length rules.
pub fn valid_date(year: i32, month: u8, day: u8) -> Option<Date> {
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Weekday number under the fixed convention: 0 = Sunday .. 6 = Saturday.
pub fn weekday_number(weekday: Weekday) -> u8 {
    weekday.number_days_from_sunday()
}

/// Recover a four-digit year from a two-digit one plus whatever else the
/// assignment has already determined, via a three-rule cascade:
/// 1. Day 29 of month 2 (the only nearby 400-divisible leap year is 2000).
/// 2. If a weekday is known, try `[2000s, 1900s, 2100s, 1800s]` and take the
///    first century whose computed weekday matches.
/// 3. POSIX default: `yy <= 68` is 2000s, else 1900s.
pub fn infer_century(two_digit_year: u8, month: u8, day: u8, weekday: Option<u8>) -> i32 {
    if month == 2 && day == 29 {
        return 2000 + two_digit_year as i32;
    }
    if let Some(weekday) = weekday {
        for century in [20, 19, 21, 18] {
            let year = century * 100 + two_digit_year as i32;
            if let Some(date) = valid_date(year, month, day) {
                if weekday_number(date.weekday()) == weekday {
                    return year;
                }
            }
        }
    }
    if two_digit_year <= 68 {
        2000 + two_digit_year as i32
    } else {
        1900 + two_digit_year as i32
    }
}

/// Adjust a 1-12 (or already-24h) hour by an AM/PM marker: `12am` decodes to
/// hour 0, `12pm` to hour 12, and any other hour is offset by 12 when `pm`.
pub fn adjust_hour_for_am_pm(hour: u8, is_pm: bool) -> u8 {
    match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_day_with_unspecified_century_picks_2000() {
        assert_eq!(infer_century(0, 2, 29, None), 2000);
    }

    #[test]
    fn posix_default_rule_splits_at_68() {
        assert_eq!(infer_century(68, 1, 1, None), 2068);
        assert_eq!(infer_century(69, 1, 1, None), 1969);
    }

    #[test]
    fn weekday_disambiguates_century() {
        // 2021-04-21 is a Wednesday (weekday 3); 1921-04-21 is a Thursday.
        let wednesday = weekday_number(time::macros::date!(2021 - 04 - 21).weekday());
        assert_eq!(infer_century(21, 4, 21, Some(wednesday)), 2021);
    }

    #[test]
    fn am_pm_hour_rules() {
        assert_eq!(adjust_hour_for_am_pm(12, false), 0);
        assert_eq!(adjust_hour_for_am_pm(12, true), 12);
        assert_eq!(adjust_hour_for_am_pm(7, true), 19);
        assert_eq!(adjust_hour_for_am_pm(7, false), 7);
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert!(valid_date(2019, 2, 29).is_none());
        assert!(valid_date(2020, 2, 29).is_some());
        assert!(valid_date(2020, 13, 1).is_none());
    }
}
