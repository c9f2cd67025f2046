//! Calendar validity across the Julian to Gregorian switch.
//!
//! A date is accepted if it exists in either of two reform calendars: the
//! Italian one (Gregorian from 1582-10-15, days 5..=14 of that October never
//! happened) or the English one (Gregorian from 1752-09-14, days 3..=13 of that
//! September never happened). Before its reform each calendar is Julian, so a
//! 29 February in 1500 is valid while the same day in 1900 is not.

use chrono::NaiveDate;

struct Reform {
    year: i32,
    month: u32,
    /// First day of the new style.
    day: u32,
    /// First dropped day.
    gap_from: u32,
}

const ITALY: Reform = Reform { year: 1582, month: 10, day: 15, gap_from: 5 };
const ENGLAND: Reform = Reform { year: 1752, month: 9, day: 14, gap_from: 3 };

fn is_julian_leap(year: i32) -> bool {
    year.rem_euclid(4) == 0
}

fn is_gregorian_leap(year: i32) -> bool {
    (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
}

fn month_length(month: u32, leap: bool) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => 0,
    }
}

fn valid_in(reform: &Reform, year: i32, month: u32, day: u32) -> bool {
    if !(1..=12).contains(&month) || day == 0 {
        return false;
    }

    if year == reform.year && month == reform.month && (reform.gap_from..reform.day).contains(&day) {
        return false;
    }

    let julian = (year, month, day) < (reform.year, reform.month, reform.day);
    let leap = if julian { is_julian_leap(year) } else { is_gregorian_leap(year) };
    day <= month_length(month, leap)
}

/// Whether `year-month-day` exists in the Italian or the English calendar.
pub fn valid_date(year: i64, month: i64, day: i64) -> bool {
    let (Ok(year), Ok(month), Ok(day)) = (i32::try_from(year), u32::try_from(month), u32::try_from(day)) else {
        return false;
    };
    valid_in(&ITALY, year, month, day) || valid_in(&ENGLAND, year, month, day)
}

/// Proleptic Gregorian [`NaiveDate`] for a validated date.
///
/// A Julian-only 29 February is clamped to the 28th.
pub fn naive_date(year: i64, month: u32, day: u32) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 { NaiveDate::from_ymd_opt(year, 2, 28) } else { None }
    })
}

/// Whether [`naive_date`] clamps this date: a 29 February that only the
/// Julian calendar has.
pub fn clamps_leap_day(year: i64, month: u32, day: u32) -> bool {
    month == 2 && day == 29 && i32::try_from(year).is_ok_and(|y| NaiveDate::from_ymd_opt(y, 2, 29).is_none())
}

/// Last day of `month` in the proleptic Gregorian calendar.
pub fn last_day(year: i64, month: u32) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Whether `month` is a calendar month number.
pub fn valid_month(month: i64) -> bool {
    (1..=12).contains(&month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_dates() {
        assert!(valid_date(2020, 2, 29));
        assert!(!valid_date(2019, 2, 29));
        assert!(!valid_date(2020, 13, 1));
        assert!(!valid_date(2020, 4, 31));
        assert!(!valid_date(2020, 0, 1));
    }

    #[test]
    fn italian_gap_is_admitted_by_english_calendar() {
        assert!(valid_date(1582, 10, 10));
        assert!(!valid_in(&ITALY, 1582, 10, 10));
    }

    #[test]
    fn english_gap_is_admitted_by_italian_calendar() {
        assert!(valid_date(1752, 9, 5));
        assert!(!valid_in(&ENGLAND, 1752, 9, 5));
    }

    #[test]
    fn julian_leap_days() {
        assert!(valid_date(1500, 2, 29));
        assert!(valid_date(1700, 2, 29));
        assert!(!valid_date(1900, 2, 29));
        assert_eq!(naive_date(1500, 2, 29), NaiveDate::from_ymd_opt(1500, 2, 28));
        assert!(clamps_leap_day(1500, 2, 29));
        assert!(!clamps_leap_day(2020, 2, 29));
        assert!(!clamps_leap_day(1500, 2, 28));
    }

    #[test]
    fn last_day_of_month() {
        assert_eq!(last_day(2024, 2), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(last_day(1999, 12), NaiveDate::from_ymd_opt(1999, 12, 31));
    }
}
