//! Dates joined by a range marker become one [`Range`].

use crate::date_types::{DateCommon, DateType, Datetype, Range};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Derive, Kind, Literal, SegmentSet};
use crate::options::AndOrDateHandling;

static RULES: &[Rule] = &[
    rule! { name: "indicator_range", contains: [date, RangeIndicator, date], act: join_pair },
    rule! { name: "hyphen_range", contains: [date, Hyphen, date], act: join_pair },
    rule! { name: "slash_range", contains: [date, Slash, date], act: join_pair },
    rule! { name: "single_range", when: find_single_range, act: join },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("ranges", set, RULES, env)
}

fn is_conjunction(set: &SegmentSet, pos: usize) -> bool {
    set.kind_at(pos) == Some(Kind::DateSeparator)
        && (set.has_subsource_at(pos, Kind::And) || set.has_subsource_at(pos, Kind::Or))
}

/// `1985 or 1990` read as one range: only dates and separators remain and at
/// least one separator came from `and`/`or`.
fn find_single_range(set: &SegmentSet, env: &Env) -> Option<Hit> {
    if env.options.and_or_date_handling != AndOrDateHandling::SingleRange || set.len() < 3 {
        return None;
    }
    let only_dates = set.kinds().iter().all(|k| k.is_date_type() || *k == Kind::DateSeparator);
    let joined = (0..set.len()).any(|p| is_conjunction(set, p));
    (only_dates && joined).then_some(Hit { start: 0, len: set.len() })
}

fn date_at(set: &SegmentSet, pos: usize) -> Result<DateType, Failure> {
    set.at(pos)
        .date
        .as_deref()
        .cloned()
        .ok_or_else(|| Failure::Unprocessable(set.at(pos).kind.as_str().to_string()))
}

/// `date marker date`. A side that is already a range means a chain such as
/// `1985-1986-1987`, which has no single reading.
fn join_pair(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let chained = [hit.start, hit.end() - 1].iter().any(|p| set.kind_at(*p) == Some(Kind::RangeDate));
    if chained {
        let lexeme = set.leaves_lexeme(&set.ids()[hit.start..hit.end()]);
        return Err(Failure::Unprocessable(format!("chained range `{}`", lexeme.trim())));
    }
    join(set, hit, env)
}

/// Range from the first to the last date of `hit`.
fn join(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let last = hit.end() - 1;
    let start = date_at(set, hit.start)?;
    let end = date_at(set, last)?;
    let indicator = (hit.start + 1..last)
        .find(|p| !set.at(*p).kind.is_date_type())
        .map(|p| set.at(p).lexeme.trim().to_string())
        .unwrap_or_default();

    let lexeme = set.leaves_lexeme(&set.ids()[hit.start..hit.end()]);
    let range = Range::new(DateCommon::new(lexeme.trim(), env.bounds()), start, end, &indicator);
    if !range.is_valid() {
        set.warn(format!("Range `{}` starts after it ends", range.lexeme()));
    }
    set.replace(hit.start..hit.end(), Kind::RangeDate, Derive::date(DateType::Range(range), Literal::Nil));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{EndingHyphen, Options};
    use crate::rules::testing::run_passes;
    use crate::rules::{
        brackets, certainty, collapse, edtf_qualifiers, months, ordinals, segmentation, standardize, tagging,
        unstructured_certainty,
    };
    use chrono::NaiveDate;

    fn ranged(input: &str, options: &Options) -> SegmentSet {
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
                segmentation::run,
                run,
            ],
            options,
        )
        .unwrap()
    }

    fn bounds(set: &SegmentSet) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let date = set.at(0).date.as_deref().unwrap();
        (date.earliest(), date.latest())
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn markers_between_dates() {
        let set = ranged("1985 to 1990", &Options::default());
        assert_eq!(set.type_string(), "range_date_type");
        assert_eq!(bounds(&set), (ymd(1985, 1, 1), ymd(1990, 12, 31)));

        let set = ranged("1985-1990", &Options::default());
        assert_eq!(set.type_string(), "range_date_type");

        let set = ranged("March 5-10, 1985", &Options::default());
        assert_eq!(set.type_string(), "range_date_type");
        assert_eq!(bounds(&set), (ymd(1985, 3, 5), ymd(1985, 3, 10)));
    }

    #[test]
    fn open_and_unknown_ends() {
        let set = ranged("1985-", &Options::default());
        assert_eq!(set.type_string(), "range_date_type");
        assert_eq!(bounds(&set), (ymd(1985, 1, 1), ymd(2999, 12, 31)));

        let mut options = Options::default();
        options.ending_hyphen = EndingHyphen::Unknown;
        let set = ranged("1985-", &options);
        let DateType::Range(range) = set.at(0).date.as_deref().unwrap() else { panic!("not a range") };
        assert_eq!(range.end.type_name(), "RangeDateUnknown");
    }

    #[test]
    fn backwards_ranges_warn() {
        let set = ranged("1990 to 1985", &Options::default());
        assert_eq!(set.type_string(), "range_date_type");
        assert_eq!(set.warnings(), &["Range `1990 to 1985` starts after it ends".to_string()]);
    }

    #[test]
    fn conjunctions_as_one_range() {
        let set = ranged("1985 or 1990", &Options::default());
        assert_eq!(set.type_string(), "year_date_type date_separator year_date_type");

        let mut options = Options::default();
        options.set("and_or_date_handling", "single_range").unwrap();
        let set = ranged("1985 or 1990", &options);
        assert_eq!(set.type_string(), "range_date_type");
        assert_eq!(bounds(&set), (ymd(1985, 1, 1), ymd(1990, 12, 31)));
    }

    #[test]
    fn chained_ranges_are_unprocessable() {
        let err = run_passes(
            "1985-1986-1987",
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
                segmentation::run,
                run,
            ],
            &Options::default(),
        )
        .unwrap_err();
        assert_eq!(err, Failure::Unprocessable("chained range `1985-1986-1987`".to_string()));
    }
}
