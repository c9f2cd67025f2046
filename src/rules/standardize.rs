//! Reshaping before tagging.
//!
//! This pass removes noise that tagging should not see (times of day,
//! commas inside a date), reorders a few layouts into the ones tagging
//! recognises, expands shorthand ranges so that both sides carry a full date,
//! and turns open or unknown range ends into endpoint dates.
//!
//! ```text
//!   March 5-7, 1985   ─▶  March 5 1985' - March' 7 1985
//!   1950-             ─▶  1950 range_indicator <open end>
//!   17th-18th century ─▶  17th century' - 18th century
//! ```

use super::helpers::{absorb_backward, is_number_at, kind_is};
use crate::date_types::{DateCommon, DateType, Endpoint, EndpointCategory, Side};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Derive, Kind, Literal, SegmentSet};
use crate::options::{BeginningHyphen, EndingHyphen, EndingSlash};

static RULES: &[Rule] = &[
    rule! { name: "time_of_day", when: find_time_of_day, act: drop_time_of_day },
    rule! { name: "year_comma_month", contains: [Number4, Comma, Month], act: year_to_end },
    rule! { name: "comma_before_year", when: find_comma_before_year, act: comma_into_previous },
    rule! { name: "short_hyphen_year", exact: [Number1or2, Hyphen, Number4], act: swap_ends },
    rule! { name: "short_slash_year", exact: [Number1or2, Slash, Number4], act: swap_ends },
    rule! { name: "numeric_slashes", contains: [num, Slash, num, Slash, num], act: slashes_to_hyphens },
    rule! { name: "century_range", when: find_century_range, act: copy_century_word },
    rule! { name: "partial_range", when: find_partial_range, act: copy_range_tail },
    rule! { name: "day_range", when: find_day_range, act: expand_day_range },
    rule! { name: "month_range", when: find_month_range, act: copy_year },
    rule! { name: "three_digit_year", when: find_three_digit_year, act: pad_year },
    rule! { name: "slash_open_end", suffix: [Slash, DoubleDot], act: into_double_dot },
    rule! { name: "open_start_slash", prefix: [DoubleDot, Slash], act: slash_into_double_dot },
    rule! { name: "leading_hyphen", when: find_leading_hyphen, act: leading_hyphen },
    rule! { name: "leading_slash", when: find_leading_slash, act: leading_slash },
    rule! { name: "leading_double_dot", when: find_leading_double_dot, act: leading_double_dot },
    rule! { name: "trailing_hyphen", when: find_trailing_hyphen, act: trailing_hyphen },
    rule! { name: "trailing_slash", when: find_trailing_slash, act: trailing_slash },
    rule! { name: "trailing_double_dot", when: find_trailing_double_dot, act: trailing_double_dot },
    rule! { name: "double_dot_range", contains: [DoubleDot], act: to_range_indicator },
    rule! { name: "date_separator", contains: [Comma], act: to_date_separator },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("standardize", set, RULES, env)
}

// --- time of day --------------------------------------------------------------

/// `T10:30:00Z`, `T10:30+01:00` after a day number.
fn find_time_of_day(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let t = (1..set.len()).find(|p| {
        set.kind_at(*p) == Some(Kind::LetterT) && is_number_at(set, p - 1) && is_number_at(set, p + 1)
    })?;
    let mut end = t + 2;
    while set.kind_at(end) == Some(Kind::Colon) && is_number_at(set, end + 1) {
        end += 2;
    }
    if set.kind_at(end) == Some(Kind::LetterZ) {
        end += 1;
    } else if kind_is(set, end, &[Kind::Plus, Kind::Hyphen])
        && is_number_at(set, end + 1)
        && (end + 2 == set.len() || set.kind_at(end + 2) == Some(Kind::Colon))
    {
        end += 2;
        if set.kind_at(end) == Some(Kind::Colon) && is_number_at(set, end + 1) {
            end += 2;
        }
    }
    Some(Hit { start: t - 1, len: end - (t - 1) })
}

fn drop_time_of_day(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.absorb_range(hit.start, hit.start..hit.end());
    set.warn("Time of day ignored");
    Ok(())
}

// --- commas and order -----------------------------------------------------------

/// `1985, March 5`: the year moves after the month (and day).
fn year_to_end(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let year = hit.start;
    set.absorb(year, hit.pos(1));
    let to = if set.kind_at(year + 2) == Some(Kind::Number1or2) { year + 2 } else { year + 1 };
    set.move_item(year, to);
    Ok(())
}

/// A day number directly after a month, or the second day of a day range.
fn is_day_context(set: &SegmentSet, pos: usize) -> bool {
    if set.kind_at(pos) != Some(Kind::Number1or2) {
        return false;
    }
    let after_month = pos >= 1 && set.kind_at(pos - 1) == Some(Kind::Month);
    let range_tail = pos >= 3
        && kind_is(set, pos - 1, &[Kind::Hyphen, Kind::RangeIndicator])
        && set.kind_at(pos - 2) == Some(Kind::Number1or2)
        && set.kind_at(pos - 3) == Some(Kind::Month);
    after_month || range_tail
}

fn find_comma_before_year(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (1..set.len().saturating_sub(1))
        .find(|p| {
            set.kind_at(*p) == Some(Kind::Comma)
                && set.kind_at(p + 1) == Some(Kind::Number4)
                && (kind_is(set, p - 1, &[Kind::Month, Kind::Season]) || is_day_context(set, p - 1))
        })
        .map(Hit::at)
}

fn comma_into_previous(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    absorb_backward(set, hit.start);
    Ok(())
}

fn swap_ends(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.swap(hit.start, hit.pos(2));
    Ok(())
}

fn slashes_to_hyphens(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.pos(1), Kind::Hyphen);
    set.retype(hit.pos(3), Kind::Hyphen);
    Ok(())
}

// --- shorthand range expansion -------------------------------------------------

fn is_range_dash(set: &SegmentSet, pos: usize) -> bool {
    kind_is(set, pos, &[Kind::Hyphen, Kind::RangeIndicator])
}

/// `17th-18th century`, `17th to late 18th century`.
fn find_century_range(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len()).find_map(|i| {
        if !is_number_at(set, i) || !is_range_dash(set, i + 1) {
            return None;
        }
        let num = if set.kind_at(i + 2) == Some(Kind::Partial) { i + 3 } else { i + 2 };
        let word = num + 1;
        (is_number_at(set, num) && kind_is(set, word, &[Kind::CenturyWord, Kind::MillenniumWord]))
            .then_some(Hit { start: i, len: word - i + 1 })
    })
}

fn copy_century_word(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.duplicate(hit.end() - 1, hit.pos(1));
    Ok(())
}

fn is_tail_stop(kind: Kind) -> bool {
    matches!(kind, Kind::Comma | Kind::DateSeparator | Kind::RangeIndicator | Kind::Hyphen | Kind::Slash)
}

/// `early to mid 1980s`: the date after the second partial is shared.
fn find_partial_range(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let kinds = set.kinds();
    (0..kinds.len().saturating_sub(3)).find_map(|i| {
        let shape = kinds[i] == Kind::Partial && is_range_dash(set, i + 1) && kinds[i + 2] == Kind::Partial;
        if !shape {
            return None;
        }
        let tail_end = (i + 3..kinds.len()).find(|p| is_tail_stop(kinds[*p])).unwrap_or(kinds.len());
        (tail_end > i + 3).then_some(Hit { start: i, len: tail_end - i })
    })
}

fn copy_range_tail(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let tail_len = hit.len - 3;
    for k in 0..tail_len {
        set.duplicate(hit.start + 3 + 2 * k, hit.start + 1 + k);
    }
    Ok(())
}

/// `March 5-7 1985`
fn find_day_range(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len())
        .find(|i| {
            set.kind_at(*i) == Some(Kind::Month)
                && set.kind_at(i + 1) == Some(Kind::Number1or2)
                && is_range_dash(set, i + 2)
                && set.kind_at(i + 3) == Some(Kind::Number1or2)
                && set.kind_at(i + 4) == Some(Kind::Number4)
        })
        .map(|start| Hit { start, len: 5 })
}

fn expand_day_range(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.duplicate(hit.pos(4), hit.pos(2));
    set.duplicate(hit.start, hit.pos(4));
    Ok(())
}

/// `March-April 1985`, `Summer-Fall 1985`.
fn find_month_range(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let month_like = [Kind::Month, Kind::Season];
    (0..set.len())
        .find(|i| {
            kind_is(set, *i, &month_like)
                && is_range_dash(set, i + 1)
                && kind_is(set, i + 2, &month_like)
                && set.kind_at(i + 3) == Some(Kind::Number4)
        })
        .map(|start| Hit { start, len: 4 })
}

fn copy_year(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.duplicate(hit.pos(3), hit.pos(1));
    Ok(())
}

fn find_three_digit_year(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len())
        .find(|p| set.kind_at(*p) == Some(Kind::Number3) && set.kind_at(p + 1) != Some(Kind::UncertaintyDigits))
        .map(Hit::at)
}

fn pad_year(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.start, Kind::Number4);
    Ok(())
}

// --- endpoints -------------------------------------------------------------------

fn into_double_dot(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.absorb(hit.pos(1), hit.start);
    Ok(())
}

fn slash_into_double_dot(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.absorb(hit.start, hit.pos(1));
    Ok(())
}

fn find_leading(set: &SegmentSet, kind: Kind) -> Option<Hit> {
    (set.len() > 1 && set.kind_at(0) == Some(kind)).then(|| Hit::at(0))
}

fn find_trailing(set: &SegmentSet, kind: Kind) -> Option<Hit> {
    let last = set.len().checked_sub(1)?;
    (last > 0 && set.kind_at(last) == Some(kind)).then(|| Hit::at(last))
}

fn find_leading_hyphen(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    find_leading(set, Kind::Hyphen)
}

fn find_leading_slash(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    find_leading(set, Kind::Slash)
}

fn find_leading_double_dot(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    find_leading(set, Kind::DoubleDot)
}

fn find_trailing_hyphen(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    find_trailing(set, Kind::Hyphen)
}

fn find_trailing_slash(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    find_trailing(set, Kind::Slash)
}

fn find_trailing_double_dot(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    find_trailing(set, Kind::DoubleDot)
}

/// Turn the marker at `pos` into an endpoint date plus a range indicator on
/// the side facing the rest of the string.
fn make_endpoint(set: &mut SegmentSet, pos: usize, side: Side, category: EndpointCategory, env: &Env) {
    let common = DateCommon::new(set.at(pos).lexeme.trim(), env.bounds());
    let date = DateType::Endpoint(Endpoint::new(common, side, category));
    let kind = date.kind();

    let (marker, indicator) = match side {
        Side::Start => (pos, pos + 1),
        Side::End => (pos + 1, pos),
    };
    set.duplicate(pos, indicator);
    set.retype(indicator, Kind::RangeIndicator);
    set.replace(marker..marker + 1, kind, Derive::date(date, Literal::Nil));
}

fn leading_hyphen(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let category = match env.options.beginning_hyphen {
        BeginningHyphen::Unknown => EndpointCategory::Unknown,
        BeginningHyphen::Open => EndpointCategory::Open,
        BeginningHyphen::Edtf => return Err(Failure::Unprocessable("negative year".to_string())),
    };
    make_endpoint(set, hit.start, Side::Start, category, env);
    Ok(())
}

fn leading_slash(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    make_endpoint(set, hit.start, Side::Start, EndpointCategory::Unknown, env);
    Ok(())
}

fn leading_double_dot(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    make_endpoint(set, hit.start, Side::Start, EndpointCategory::Open, env);
    Ok(())
}

fn trailing_hyphen(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let category = match env.options.ending_hyphen {
        EndingHyphen::Open => EndpointCategory::Open,
        EndingHyphen::Unknown => EndpointCategory::Unknown,
    };
    make_endpoint(set, hit.start, Side::End, category, env);
    Ok(())
}

fn trailing_slash(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let category = match env.options.ending_slash {
        EndingSlash::Open => EndpointCategory::Open,
        EndingSlash::Unknown => EndpointCategory::Unknown,
    };
    make_endpoint(set, hit.start, Side::End, category, env);
    Ok(())
}

fn trailing_double_dot(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    make_endpoint(set, hit.start, Side::End, EndpointCategory::Open, env);
    Ok(())
}

fn to_range_indicator(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.start, Kind::RangeIndicator);
    Ok(())
}

fn to_date_separator(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.start, Kind::DateSeparator);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::rules::testing::run_passes;
    use crate::rules::{certainty, collapse, months, ordinals};

    fn standardized(input: &str, options: &Options) -> Result<SegmentSet, Failure> {
        run_passes(input, &[collapse::run, certainty::run, months::run, ordinals::run, run], options)
    }

    fn types(input: &str) -> String {
        standardized(input, &Options::default()).unwrap().type_string()
    }

    #[test]
    fn time_of_day_is_dropped_with_a_warning() {
        let set = standardized("1985-04-12T23:20:30Z", &Options::default()).unwrap();
        assert_eq!(set.type_string(), "number4 hyphen number1or2 hyphen number1or2");
        assert_eq!(set.at(4).literal, Literal::Int(12));
        assert_eq!(set.warnings(), &["Time of day ignored".to_string()]);

        assert_eq!(types("1985-04-12T23:20+04:00"), "number4 hyphen number1or2 hyphen number1or2");
    }

    #[test]
    fn commas_inside_dates_are_absorbed() {
        assert_eq!(types("March 5, 1985"), "month number1or2 number4");
        assert_eq!(types("March, 1985"), "month number4");
        assert_eq!(types("1985, March 5"), "month number1or2 number4");
        assert_eq!(types("1985, 1990"), "number4 date_separator number4");
    }

    #[test]
    fn short_then_year_swaps() {
        let set = standardized("5/1985", &Options::default()).unwrap();
        assert_eq!(set.type_string(), "number4 slash number1or2");
        assert_eq!(set.full_lexeme(), "5/1985");
    }

    #[test]
    fn numeric_slashes_become_hyphens() {
        assert_eq!(types("2/3/2020"), "number1or2 hyphen number1or2 hyphen number4");
    }

    #[test]
    fn shorthand_ranges_are_expanded() {
        assert_eq!(types("17th-18th century"), "number1or2 century hyphen number1or2 century");
        assert_eq!(types("March 5-7, 1985"), "month number1or2 number4 hyphen month number1or2 number4");
        assert_eq!(types("March-April 1985"), "month number4 hyphen month number4");
        assert_eq!(types("early to mid 1980s"), "partial number4 letter_s range_indicator partial number4 letter_s");
    }

    #[test]
    fn three_digit_years_are_padded() {
        let set = standardized("985", &Options::default()).unwrap();
        assert_eq!(set.type_string(), "number4");
        assert_eq!(set.at(0).literal, Literal::Int(985));
        assert_eq!(types("19uu"), "number1or2 uncertainty_digits");
    }

    #[test]
    fn open_and_unknown_ends_become_endpoints() {
        assert_eq!(types("1985-"), "number4 range_indicator rangedateopen_date_type");
        assert_eq!(types("-1985"), "rangedateunknown_date_type range_indicator number4");
        assert_eq!(types("1985/.."), "number4 range_indicator rangedateopen_date_type");
        assert_eq!(types("../1985"), "rangedateopen_date_type range_indicator number4");
        assert_eq!(types("1985/"), "number4 range_indicator rangedateopen_date_type");
        assert_eq!(types("1985..1990"), "number4 range_indicator number4");

        let mut options = Options::default();
        options.set("beginning_hyphen", "edtf").unwrap();
        assert!(matches!(standardized("-1985", &options), Err(Failure::Unprocessable(_))));

        options.set("ending_slash", "unknown").unwrap();
        let set = standardized("1985/", &options).unwrap();
        assert_eq!(set.type_string(), "number4 range_indicator rangedateunknown_date_type");
    }
}
