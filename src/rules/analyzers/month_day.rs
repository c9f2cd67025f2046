use super::Candidate;
use crate::calendar::{valid_date, valid_month};
use crate::error::Failure;
use crate::options::AmbiguousMonthDay;

/// Which of two numbers is the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthDay {
    pub month_first: bool,
    pub month: i64,
    pub day: i64,
    pub warning: Option<String>,
}

/// Decide month and day between `first` and `second` in `year`.
///
/// A value above 12 can only be the day. When both could be months the
/// preference decides and a warning is returned.
pub(crate) fn analyze(
    first: &Candidate,
    second: &Candidate,
    year: i64,
    preference: AmbiguousMonthDay,
) -> Result<MonthDay, Failure> {
    let fail = || Failure::MonthDay(format!("{}-{}-{}", first.lexeme, second.lexeme, year));

    let (month_first, warning) = match (valid_month(first.value), valid_month(second.value)) {
        (true, false) => (true, None),
        (false, true) => (false, None),
        (true, true) if first.value == second.value => (true, None),
        (true, true) => match preference {
            AmbiguousMonthDay::AsMonthDay => (true, Some("Ambiguous month/day treated as month/day".to_string())),
            AmbiguousMonthDay::AsDayMonth => (false, Some("Ambiguous month/day treated as day/month".to_string())),
        },
        (false, false) => return Err(fail()),
    };

    let (month, day) = if month_first { (first.value, second.value) } else { (second.value, first.value) };
    if !valid_date(year, month, day) {
        return Err(fail());
    }
    Ok(MonthDay { month_first, month, day, warning })
}
