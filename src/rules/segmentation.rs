//! Date parts become date types.
//!
//! A run of adjacent parts, optionally led by partial indicators and range
//! switches, is grouped by its sorted part kinds. `{year, month}` is a
//! `YearMonth`, `{century}` a `Century`, and so on. A combination with no date
//! type fails the run.

use super::helpers::value_at;
use crate::calendar::{clamps_leap_day, valid_date, valid_month};
use crate::date_types::{
    Century, DateCommon, DateType, Datetype, Decade, Millennium, Year, YearMonth, YearMonthDay, YearSeason,
};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Derive, Kind, Literal, SegmentSet};

/// EDTF code for winter.
const WINTER: i64 = 24;

static RULES: &[Rule] = &[
    rule! { name: "eight_digits", contains: [Number8], act: eight_digits },
    rule! { name: "six_digits", contains: [Number6], act: six_digits },
    rule! { name: "long_number", contains: [NumberOther], act: long_number },
    rule! { name: "winter_span", when: find_winter_span, act: winter_span },
    rule! { name: "part_run", when: find_part_run, act: part_run },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("segmentation", set, RULES, env)
}

/// Replace `hit` with `date`, keyed by the date's own kind.
///
/// Bounds a range switch turned inside out and Julian leap days shifted to
/// the 28th are reported as warnings.
fn place(set: &mut SegmentSet, hit: &Hit, date: DateType) {
    match (date.earliest(), date.latest()) {
        (Some(earliest), Some(latest)) if earliest > latest => {
            set.warn(format!("`{}` starts after it ends", date.lexeme()));
        }
        _ => {}
    }
    match &date {
        DateType::YearMonthDay(ymd) if clamps_leap_day(ymd.year, ymd.month, ymd.day) => {
            set.warn(format!("Julian leap day {:04}-02-29 shown as {:04}-02-28", ymd.year, ymd.year));
        }
        _ => {}
    }

    let literal = date.literal().map_or(Literal::Nil, Literal::Int);
    let kind = date.kind();
    set.replace(hit.start..hit.end(), kind, Derive::date(date, literal));
}

fn common_for(set: &SegmentSet, hit: &Hit, env: &Env) -> DateCommon {
    DateCommon::assemble(set, &set.ids()[hit.start..hit.end()], env.bounds())
}

fn narrow<T: TryFrom<i64>>(value: i64, what: &str) -> Result<T, Failure> {
    T::try_from(value).map_err(|_| Failure::Unsegmentable(format!("{what} {value}")))
}

// --- digit blobs ---------------------------------------------------------------

fn long_year(set: &mut SegmentSet, hit: &Hit, env: &Env) {
    let digits = set.at(hit.start).digits();
    let year = value_at(set, hit.start);
    let date = DateType::Year(Year::new(common_for(set, hit, env), year));
    place(set, hit, date);
    set.warn(format!("{digits} treated as a long year"));
}

fn field(digits: &str, range: std::ops::Range<usize>) -> Option<i64> {
    digits.get(range)?.parse().ok()
}

/// `19850613`
fn eight_digits(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let digits = set.at(hit.start).digits();
    let (year, month, day) = match (field(&digits, 0..4), field(&digits, 4..6), field(&digits, 6..8)) {
        (Some(y), Some(m), Some(d)) if valid_date(y, m, d) => (y, m, d),
        _ => {
            long_year(set, hit, env);
            return Ok(());
        }
    };
    let date = YearMonthDay::new(common_for(set, hit, env), year, narrow(month, "month")?, narrow(day, "day")?);
    place(set, hit, DateType::YearMonthDay(date));
    Ok(())
}

/// `198506`
fn six_digits(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let digits = set.at(hit.start).digits();
    match (field(&digits, 0..4), field(&digits, 4..6)) {
        (Some(year), Some(month)) if valid_month(month) => {
            let date = YearMonth::new(common_for(set, hit, env), year, narrow(month, "month")?);
            place(set, hit, DateType::YearMonth(date));
        }
        _ => long_year(set, hit, env),
    }
    Ok(())
}

fn long_number(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    long_year(set, hit, env);
    Ok(())
}

// --- winter YYYY-YYYY ------------------------------------------------------------

/// `winter 1985-1986`: one season spanning the turn of the year.
fn find_winter_span(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len().saturating_sub(3))
        .find(|p| {
            set.kind_at(*p) == Some(Kind::Season)
                && value_at(set, *p) == WINTER
                && set.kind_at(p + 1) == Some(Kind::Year)
                && matches!(set.kind_at(p + 2), Some(Kind::Hyphen | Kind::Slash | Kind::RangeIndicator))
                && set.kind_at(p + 3) == Some(Kind::Year)
                && value_at(set, p + 3) == value_at(set, p + 1) + 1
        })
        .map(|start| Hit { start, len: 4 })
}

fn winter_span(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let year = value_at(set, hit.pos(3));
    let date = YearSeason::new(common_for(set, hit, env), year, narrow(WINTER, "season")?).including_previous_year();
    place(set, hit, DateType::YearSeason(date));
    Ok(())
}

// --- part runs ---------------------------------------------------------------------

fn is_prefix(kind: Kind) -> bool {
    matches!(kind, Kind::Partial | Kind::RangeSwitch)
}

/// Prefixes followed by the longest run of date parts.
fn find_part_run(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let kinds = set.kinds();
    let mut start = 0;
    while start < kinds.len() {
        let first_part = start + kinds[start..].iter().take_while(|k| is_prefix(**k)).count();
        let end = first_part + kinds[first_part..].iter().take_while(|k| k.is_date_part()).count();
        if end > first_part {
            return Some(Hit { start, len: end - start });
        }
        start = first_part.max(start + 1);
    }
    None
}

fn part_run(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let common = common_for(set, hit, env);
    let parts: Vec<usize> =
        (hit.start..hit.end()).filter(|p| set.kind_at(*p).is_some_and(Kind::is_date_part)).collect();
    let mut kinds: Vec<Kind> = parts.iter().filter_map(|p| set.kind_at(*p)).collect();
    kinds.sort();

    let named = |word: Kind| parts.iter().any(|p| set.has_subsource_at(*p, word));
    let value = |kind: Kind| common.part_value(kind).unwrap_or_default();
    let unsegmentable = || {
        let types: Vec<&str> = (hit.start..hit.end()).filter_map(|p| set.kind_at(p)).map(Kind::as_str).collect();
        Failure::Unsegmentable(types.join(" "))
    };

    let date = match kinds.as_slice() {
        [Kind::Year] => {
            let year = value(Kind::Year);
            DateType::Year(Year::new(common, year))
        }
        [Kind::Year, Kind::Month] => {
            let (year, month) = (value(Kind::Year), value(Kind::Month));
            if !valid_month(month) {
                return Err(unsegmentable());
            }
            DateType::YearMonth(YearMonth::new(common, year, narrow(month, "month")?))
        }
        [Kind::Year, Kind::Month, Kind::Day] => {
            let (year, month, day) = (value(Kind::Year), value(Kind::Month), value(Kind::Day));
            if !valid_date(year, month, day) {
                let text = set.leaves_lexeme(&set.ids()[hit.start..hit.end()]);
                return Err(Failure::InvalidDate(text.trim().to_string()));
            }
            DateType::YearMonthDay(YearMonthDay::new(common, year, narrow(month, "month")?, narrow(day, "day")?))
        }
        [Kind::Year, Kind::Season] => {
            let (year, season) = (value(Kind::Year), value(Kind::Season));
            DateType::YearSeason(YearSeason::new(common, year, narrow(season, "season")?))
        }
        [Kind::Century] => {
            let century = value(Kind::Century);
            if named(Kind::CenturyWord) {
                DateType::Century(Century::named(common, century))
            } else {
                DateType::Century(Century::plural(common, century))
            }
        }
        [Kind::Decade] => {
            let decade = value(Kind::Decade);
            DateType::Decade(Decade::new(common, decade))
        }
        [Kind::Millennium] => {
            let millennium = value(Kind::Millennium);
            if named(Kind::MillenniumWord) {
                DateType::Millennium(Millennium::named(common, millennium))
            } else {
                DateType::Millennium(Millennium::plural(common, millennium))
            }
        }
        _ => return Err(unsegmentable()),
    };
    place(set, hit, date);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sym;
    use crate::options::Options;
    use crate::rules::testing::run_passes;
    use crate::rules::{
        brackets, certainty, collapse, edtf_qualifiers, months, ordinals, standardize, tagging, unstructured_certainty,
    };
    use chrono::NaiveDate;

    fn segmented(input: &str) -> Result<SegmentSet, Failure> {
        segmented_with(input, &Options::default())
    }

    fn segmented_with(input: &str, options: &Options) -> Result<SegmentSet, Failure> {
        run_passes(
            input,
            &[
                collapse::run,
                brackets::run,
                edtf_qualifiers::run,
                certainty::run,
                unstructured_certainty::run,
                months::run,
                ordinals::run,
                standardize::run,
                tagging::run,
                run,
            ],
            options,
        )
    }

    fn date_at(set: &SegmentSet, pos: usize) -> &DateType {
        set.at(pos).date.as_deref().unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn part_sets_pick_the_date_type() {
        let set = segmented("March 5, 1985").unwrap();
        assert_eq!(set.type_string(), "yearmonthday_date_type");
        assert_eq!(date_at(&set, 0).earliest(), ymd(1985, 3, 5));

        let set = segmented("Spring 2002").unwrap();
        assert_eq!(set.type_string(), "yearseason_date_type");

        let set = segmented("1985-04").unwrap();
        assert_eq!(set.type_string(), "yearmonth_date_type");
        assert_eq!(date_at(&set, 0).literal(), Some(198504));
    }

    #[test]
    fn named_and_plural_centuries() {
        let set = segmented("19th century").unwrap();
        let date = date_at(&set, 0);
        assert_eq!((date.earliest(), date.latest()), (ymd(1801, 1, 1), ymd(1900, 12, 31)));

        let set = segmented("1900s").unwrap();
        let date = date_at(&set, 0);
        assert_eq!((date.earliest(), date.latest()), (ymd(1900, 1, 1), ymd(1999, 12, 31)));
    }

    #[test]
    fn prefixes_join_the_run() {
        let set = segmented("mid-1980s").unwrap();
        assert_eq!(set.type_string(), "decade_date_type");
        assert_eq!(date_at(&set, 0).partial(), Some(Sym::Mid));

        let set = segmented("before 1950").unwrap();
        assert_eq!(set.type_string(), "year_date_type");
        assert_eq!(date_at(&set, 0).range_switch(), Some(Sym::Before));
        assert_eq!(date_at(&set, 0).latest(), ymd(1949, 12, 31));
    }

    #[test]
    fn digit_blobs() {
        let set = segmented("19850613").unwrap();
        assert_eq!(set.type_string(), "yearmonthday_date_type");

        let set = segmented("198506").unwrap();
        assert_eq!(set.type_string(), "yearmonth_date_type");

        let set = segmented("198513").unwrap();
        assert_eq!(set.type_string(), "year_date_type");
        assert_eq!(set.warnings(), &["198513 treated as a long year".to_string()]);
    }

    #[test]
    fn winter_across_the_turn_of_the_year() {
        let set = segmented("winter 1985-1986").unwrap();
        assert_eq!(set.type_string(), "yearseason_date_type");
        let date = date_at(&set, 0);
        assert_eq!(date.earliest(), ymd(1985, 12, 1));
        assert_eq!(date.latest(), ymd(1986, 2, 28));
    }

    #[test]
    fn unknown_part_sets_fail() {
        let err = segmented("1985 1990").unwrap_err();
        assert_eq!(err, Failure::Unsegmentable("year year".to_string()));
    }

    #[test]
    fn inverted_before_ranges_warn() {
        let mut options = Options::default();
        options.set("before_date_treatment", "range").unwrap();

        let set = segmented_with("before 1500", &options).unwrap();
        let date = date_at(&set, 0);
        assert_eq!((date.earliest(), date.latest()), (ymd(1583, 1, 1), ymd(1499, 12, 31)));
        assert_eq!(set.warnings().len(), 1);
        assert!(set.warnings()[0].ends_with("starts after it ends"));

        let set = segmented_with("before 1950", &options).unwrap();
        assert!(set.warnings().is_empty());
    }

    #[test]
    fn julian_leap_days_are_reported() {
        let set = segmented("1500-02-29").unwrap();
        let date = date_at(&set, 0);
        assert_eq!(date.earliest(), ymd(1500, 2, 28));
        assert_eq!(date.literal(), Some(15000229));
        assert_eq!(set.warnings(), &["Julian leap day 1500-02-29 shown as 1500-02-28".to_string()]);

        assert!(segmented("2020-02-29").unwrap().warnings().is_empty());
    }
}
