//! Numbers become date parts.
//!
//! Layout rules come first (`March 5 1985`, ISO dates, numeric triples), then
//! plural and named periods, then whatever bare years are left. Purely numeric
//! layouts that could be read more than one way go through the analyzers.

use super::analyzers::month_season_year::Reading;
use super::analyzers::{Candidate, all_short_mdy, month_day, month_season_year, short_year};
use super::helpers::{describe, is_number_at, kind_is, tag, tag_span, value_at};
use crate::calendar::valid_date;
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Kind, SegmentSet};
use crate::options::PluralizedDateInterpretation;

static RULES: &[Rule] = &[
    rule! { name: "uncertainty_digits", contains: [num, UncertaintyDigits], act: unknown_digits },
    rule! { name: "plural_year", contains: [Number4, LetterS], act: plural_year },
    rule! { name: "plural_short_year", contains: [Number1or2, LetterS], act: plural_short_year },
    rule! { name: "named_century", contains: [num, CenturyWord], act: named_century },
    rule! { name: "named_millennium", contains: [num, MillenniumWord], act: named_millennium },
    rule! { name: "month_day_year", contains: [Month, Number1or2, year4], act: month_day_year },
    rule! { name: "day_month_year", contains: [Number1or2, Month, year4], act: day_month_year },
    rule! { name: "year_month_day", contains: [year4, Month, Number1or2], act: year_month_day },
    rule! { name: "iso_date", contains: [Number4, Hyphen, Number1or2, Hyphen, Number1or2], act: iso_date },
    rule! { name: "numeric_month_day", contains: [Number1or2, Hyphen, Number1or2, Hyphen, year4], act: numeric_month_day },
    rule! { name: "all_short", contains: [Number1or2, Hyphen, Number1or2, Hyphen, Number1or2], act: all_short },
    rule! { name: "year_and_short", when: find_year_and_short, act: year_and_short },
    rule! { name: "month_year", contains: [Month, Number4], act: second_is_year },
    rule! { name: "season_year", contains: [Season, Number4], act: second_is_year },
    rule! { name: "bare_year", when: find_bare_year, act: bare_year },
    rule! { name: "apostrophe_year", when: find_apostrophe_year, act: apostrophe_year },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("tagging", set, RULES, env)
}

// --- plural and named periods -------------------------------------------------

/// `198u`, `19uu`, `1uuu`
fn unknown_digits(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let value = value_at(set, hit.start);
    let known = set.at(hit.start).digits().len();
    let unknown = set.at(hit.pos(1)).lexeme.trim().len();
    let kind = match (known + unknown, unknown) {
        (4, 1) => Kind::Decade,
        (4, 2) => Kind::Century,
        (4, 3) => Kind::Millennium,
        _ => return Err(Failure::Unprocessable(describe(set, &[hit.start, hit.pos(1)]))),
    };
    tag_span(set, hit.start, hit.end(), kind, value);
    Ok(())
}

/// `1980s`, `1900s`, `2000s`
fn plural_year(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let value = value_at(set, hit.start);
    if value % 10 != 0 {
        return Err(Failure::Unprocessable(describe(set, &[hit.start, hit.pos(1)])));
    }
    let (kind, literal) = match env.options.pluralized_date_interpretation {
        PluralizedDateInterpretation::Broad if value % 1000 == 0 => (Kind::Millennium, value / 1000),
        PluralizedDateInterpretation::Broad if value % 100 == 0 => (Kind::Century, value / 100),
        _ => (Kind::Decade, value / 10),
    };
    tag_span(set, hit.start, hit.end(), kind, literal);
    Ok(())
}

/// `80s`, `'80s`
fn plural_short_year(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let value = value_at(set, hit.start);
    if value % 10 != 0 {
        return Err(Failure::Unprocessable(describe(set, &[hit.start, hit.pos(1)])));
    }
    let year = short_year::expand(value, env.options, env.reference_year());
    tag_span(set, hit.start, hit.end(), Kind::Decade, year / 10);
    Ok(())
}

fn ordinal_period(set: &mut SegmentSet, hit: &Hit, kind: Kind) -> Result<(), Failure> {
    let value = value_at(set, hit.start);
    if value < 1 {
        return Err(Failure::Unprocessable(describe(set, &[hit.start, hit.pos(1)])));
    }
    tag_span(set, hit.start, hit.end(), kind, value - 1);
    Ok(())
}

/// `19th century`: stored as the number of completed centuries.
fn named_century(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    ordinal_period(set, hit, Kind::Century)
}

fn named_millennium(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    ordinal_period(set, hit, Kind::Millennium)
}

// --- month names ---------------------------------------------------------------

fn check_date(set: &SegmentSet, hit: &Hit, year: i64, month: i64, day: i64) -> Result<(), Failure> {
    if valid_date(year, month, day) {
        Ok(())
    } else {
        let lexeme = set.leaves_lexeme(&set.ids()[hit.start..hit.end()]);
        Err(Failure::InvalidDate(lexeme.trim().to_string()))
    }
}

/// `March 5 1985`
fn month_day_year(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let (month, day, year) = (value_at(set, hit.start), value_at(set, hit.pos(1)), value_at(set, hit.pos(2)));
    check_date(set, hit, year, month, day)?;
    tag(set, hit.pos(1), Kind::Day, day);
    tag(set, hit.pos(2), Kind::Year, year);
    Ok(())
}

/// `5 March 1985`
fn day_month_year(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let (day, month, year) = (value_at(set, hit.start), value_at(set, hit.pos(1)), value_at(set, hit.pos(2)));
    check_date(set, hit, year, month, day)?;
    tag(set, hit.start, Kind::Day, day);
    tag(set, hit.pos(2), Kind::Year, year);
    Ok(())
}

/// `1985 March 5`
fn year_month_day(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let (year, month, day) = (value_at(set, hit.start), value_at(set, hit.pos(1)), value_at(set, hit.pos(2)));
    check_date(set, hit, year, month, day)?;
    tag(set, hit.start, Kind::Year, year);
    tag(set, hit.pos(2), Kind::Day, day);
    Ok(())
}

fn second_is_year(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let year = value_at(set, hit.pos(1));
    tag(set, hit.pos(1), Kind::Year, year);
    Ok(())
}

// --- numeric layouts -------------------------------------------------------------

/// Tag the three numbers of `n - n - n` at `hit`, folding each hyphen into
/// the number after it.
fn tag_triple(set: &mut SegmentSet, hit: &Hit, parts: [(Kind, i64); 3]) {
    let [(k0, v0), (k1, v1), (k2, v2)] = parts;
    tag_span(set, hit.pos(3), hit.pos(5), k2, v2);
    tag_span(set, hit.pos(1), hit.pos(3), k1, v1);
    tag(set, hit.start, k0, v0);
}

/// `2004-06-11`
fn iso_date(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let (year, month, day) = (value_at(set, hit.start), value_at(set, hit.pos(2)), value_at(set, hit.pos(4)));
    check_date(set, hit, year, month, day)?;
    tag_triple(set, hit, [(Kind::Year, year), (Kind::Month, month), (Kind::Day, day)]);
    Ok(())
}

/// `02-03-2020`
fn numeric_month_day(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let first = Candidate::at(set, hit.start);
    let second = Candidate::at(set, hit.pos(2));
    let year = value_at(set, hit.pos(4));
    let md = month_day::analyze(&first, &second, year, env.options.ambiguous_month_day)?;

    let (k0, k1) = if md.month_first { (Kind::Month, Kind::Day) } else { (Kind::Day, Kind::Month) };
    tag_triple(set, hit, [(k0, first.value), (k1, second.value), (Kind::Year, year)]);
    if let Some(warning) = md.warning {
        set.warn(warning);
    }
    Ok(())
}

/// `87-04-13`, `10-02-06`
fn all_short(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let candidates = [Candidate::at(set, hit.start), Candidate::at(set, hit.pos(2)), Candidate::at(set, hit.pos(4))];
    let assignment = all_short_mdy::analyze(&candidates, env.options, env.reference_year())?;

    let mut parts = [(Kind::Year, 0); 3];
    parts[assignment.order.year] = (Kind::Year, assignment.year);
    parts[assignment.order.month] = (Kind::Month, assignment.month);
    parts[assignment.order.day] = (Kind::Day, assignment.day);
    tag_triple(set, hit, parts);
    for warning in assignment.warnings {
        set.warn(warning);
    }
    Ok(())
}

/// `1985-86`, `2004-06`, `1985/5`, not followed by a third component.
fn find_year_and_short(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len())
        .find(|p| {
            set.kind_at(*p) == Some(Kind::Number4)
                && kind_is(set, p + 1, &[Kind::Hyphen, Kind::Slash])
                && set.kind_at(p + 2) == Some(Kind::Number1or2)
                && !(kind_is(set, p + 3, &[Kind::Hyphen, Kind::Slash]) && is_number_at(set, p + 4))
        })
        .map(|start| Hit { start, len: 3 })
}

fn year_and_short(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let year = value_at(set, hit.start);
    let nn = Candidate::at(set, hit.pos(2));
    let (reading, warning) = month_season_year::analyze(year, &nn, env.options)?;

    match reading {
        Reading::Year(second) => {
            tag(set, hit.pos(2), Kind::Year, second);
        }
        Reading::Month(month) => {
            tag_span(set, hit.pos(1), hit.end(), Kind::Month, month);
        }
        Reading::Season(season) => {
            tag_span(set, hit.pos(1), hit.end(), Kind::Season, season);
        }
    }
    tag(set, hit.start, Kind::Year, year);
    if let Some(warning) = warning {
        set.warn(warning);
    }
    Ok(())
}

// --- leftover years ----------------------------------------------------------------

/// A 4-digit number no later than the reference year.
fn find_bare_year(set: &SegmentSet, env: &Env) -> Option<Hit> {
    (0..set.len())
        .find(|p| set.kind_at(*p) == Some(Kind::Number4) && value_at(set, *p) <= env.reference_year())
        .map(Hit::at)
}

fn bare_year(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let year = value_at(set, hit.start);
    tag(set, hit.start, Kind::Year, year);
    Ok(())
}

/// `'85`
fn find_apostrophe_year(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len())
        .find(|p| set.kind_at(*p) == Some(Kind::Number1or2) && set.has_subsource_at(*p, Kind::Apostrophe))
        .map(Hit::at)
}

fn apostrophe_year(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let year = short_year::expand(value_at(set, hit.start), env.options, env.reference_year());
    tag(set, hit.start, Kind::Year, year);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;
    use crate::options::Options;
    use crate::rules::testing::run_passes;
    use crate::rules::{brackets, certainty, collapse, edtf_qualifiers, months, ordinals, standardize};

    fn tagged(input: &str, options: &Options) -> Result<SegmentSet, Failure> {
        run_passes(
            input,
            &[
                collapse::run,
                brackets::run,
                edtf_qualifiers::run,
                certainty::run,
                months::run,
                ordinals::run,
                standardize::run,
                run,
            ],
            options,
        )
    }

    fn parts(input: &str) -> Vec<(Kind, i64)> {
        let set = tagged(input, &Options::default()).unwrap();
        (0..set.len()).map(|p| (set.at(p).kind, set.at(p).int().unwrap_or(-1))).collect()
    }

    #[test]
    fn month_name_layouts() {
        assert_eq!(parts("March 5, 1985"), vec![(Kind::Month, 3), (Kind::Day, 5), (Kind::Year, 1985)]);
        assert_eq!(parts("5 March 1985"), vec![(Kind::Day, 5), (Kind::Month, 3), (Kind::Year, 1985)]);
        assert_eq!(parts("1985 March 5"), vec![(Kind::Year, 1985), (Kind::Month, 3), (Kind::Day, 5)]);
        assert_eq!(parts("March 1985"), vec![(Kind::Month, 3), (Kind::Year, 1985)]);
        assert_eq!(parts("Spring 2002"), vec![(Kind::Season, 21), (Kind::Year, 2002)]);
    }

    #[test]
    fn impossible_month_name_dates_fail() {
        let err = tagged("February 30, 1985", &Options::default()).unwrap_err();
        assert_eq!(err, Failure::InvalidDate("February 30, 1985".to_string()));

        let err = tagged("2020-02-30", &Options::default()).unwrap_err();
        assert_eq!(err, Failure::InvalidDate("2020-02-30".to_string()));
    }

    #[test]
    fn numeric_layouts() {
        assert_eq!(parts("2004-06-11"), vec![(Kind::Year, 2004), (Kind::Month, 6), (Kind::Day, 11)]);
        assert_eq!(parts("87-04-13"), vec![(Kind::Year, 1987), (Kind::Month, 4), (Kind::Day, 13)]);
        assert_eq!(parts("02-03-2020"), vec![(Kind::Month, 2), (Kind::Day, 3), (Kind::Year, 2020)]);
        assert_eq!(parts("13/02/2020"), vec![(Kind::Day, 13), (Kind::Month, 2), (Kind::Year, 2020)]);

        let mut options = Options::default();
        options.set("ambiguous_month_day", "as_day_month").unwrap();
        let set = tagged("02-03-2020", &options).unwrap();
        assert_eq!(set.kinds(), vec![Kind::Day, Kind::Month, Kind::Year]);
        assert_eq!(set.warnings().len(), 1);
    }

    #[test]
    fn year_with_short_component() {
        assert_eq!(parts("1985-86"), vec![(Kind::Year, 1985), (Kind::Hyphen, -1), (Kind::Year, 1986)]);
        assert_eq!(parts("1985-04"), vec![(Kind::Year, 1985), (Kind::Month, 4)]);
        assert_eq!(parts("5/1985"), vec![(Kind::Year, 1985), (Kind::Month, 5)]);

        let set = tagged("2010-12", &Options::default()).unwrap();
        assert_eq!(set.type_string(), "year hyphen year");
        assert_eq!(set.warnings(), &["Ambiguous year/month treated as year range".to_string()]);
    }

    #[test]
    fn plural_and_named_periods() {
        assert_eq!(parts("1980s"), vec![(Kind::Decade, 198)]);
        assert_eq!(parts("1900s"), vec![(Kind::Century, 19)]);
        assert_eq!(parts("2000s"), vec![(Kind::Millennium, 2)]);
        assert_eq!(parts("'80s"), vec![(Kind::Decade, 198)]);
        assert_eq!(parts("19th century"), vec![(Kind::Century, 18)]);
        assert_eq!(parts("2nd millennium"), vec![(Kind::Millennium, 1)]);
        assert_eq!(parts("198u"), vec![(Kind::Decade, 198)]);
        assert_eq!(parts("19uu"), vec![(Kind::Century, 19)]);

        let mut options = Options::default();
        options.set("pluralized_date_interpretation", "decade").unwrap();
        let set = tagged("1900s", &options).unwrap();
        assert_eq!(set.at(0).kind, Kind::Decade);
        assert_eq!(set.at(0).literal, Literal::Int(190));
    }

    #[test]
    fn bare_years_stop_at_the_reference_year() {
        assert_eq!(parts("1985"), vec![(Kind::Year, 1985)]);
        assert_eq!(parts("2030"), vec![(Kind::Number4, 2030)]);
        assert_eq!(parts("'85"), vec![(Kind::Year, 1985)]);
        assert_eq!(parts("March 5 2030"), vec![(Kind::Month, 3), (Kind::Day, 5), (Kind::Year, 2030)]);
    }

    #[test]
    fn tagging_tagged_output_changes_nothing() {
        let options = Options::default();
        let context = crate::api::Context::default();
        let env = Env::new(&context, &options);
        for input in ["March 5, 1985", "87-04-13", "1985-86", "1980s", "19th century", "'85"] {
            let mut set = tagged(input, &options).unwrap();
            let before = set.ids().to_vec();
            run(&mut set, &env).unwrap();
            assert_eq!(set.ids(), before.as_slice(), "'{}' was retagged", input);
        }
    }
}
