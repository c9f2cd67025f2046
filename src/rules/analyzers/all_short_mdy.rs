use super::{Candidate, month_day, short_year};
use crate::calendar::valid_date;
use crate::error::Failure;
use crate::options::{AmbiguousMonthDayYear, Options};

/// Positions of the year, month and day among the three candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Order {
    pub year: usize,
    pub month: usize,
    pub day: usize,
}

impl Order {
    const fn new(year: usize, month: usize, day: usize) -> Self {
        Self { year, month, day }
    }
}

const PERMUTATIONS: [Order; 6] = [
    Order::new(0, 1, 2),
    Order::new(0, 2, 1),
    Order::new(1, 0, 2),
    Order::new(1, 2, 0),
    Order::new(2, 0, 1),
    Order::new(2, 1, 0),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub order: Order,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub warnings: Vec<String>,
}

fn preferred(preference: AmbiguousMonthDayYear) -> Order {
    match preference {
        AmbiguousMonthDayYear::MonthDayYear => Order::new(2, 0, 1),
        AmbiguousMonthDayYear::DayMonthYear => Order::new(2, 1, 0),
        AmbiguousMonthDayYear::YearMonthDay => Order::new(0, 1, 2),
        AmbiguousMonthDayYear::YearDayMonth => Order::new(0, 2, 1),
    }
}

/// Resolve three short numbers (`87-04-13`, `10-02-06`) into a date.
///
/// Every year/month/day permutation is tried with the year expanded. One
/// valid reading wins outright; two readings sharing a year reduce to a
/// month/day question; anything more falls back to the preferred order.
pub(crate) fn analyze(
    candidates: &[Candidate; 3],
    options: &Options,
    reference_year: i64,
) -> Result<Assignment, Failure> {
    let expand = |c: &Candidate| short_year::expand(c.value, options, reference_year);
    let assign = |order: Order| Assignment {
        order,
        year: expand(&candidates[order.year]),
        month: candidates[order.month].value,
        day: candidates[order.day].value,
        warnings: Vec::new(),
    };

    let valid: Vec<Order> = PERMUTATIONS
        .iter()
        .copied()
        .filter(|o| valid_date(expand(&candidates[o.year]), candidates[o.month].value, candidates[o.day].value))
        .collect();

    match valid.as_slice() {
        [] => {
            let text = candidates.iter().map(|c| c.lexeme.as_str()).collect::<Vec<_>>().join("-");
            Err(Failure::MonthDayYear(text))
        }
        [only] => Ok(assign(*only)),
        [a, b] if a.year == b.year => {
            let (first, second) = match a.year {
                0 => (1, 2),
                1 => (0, 2),
                _ => (0, 1),
            };
            let year = expand(&candidates[a.year]);
            let md = month_day::analyze(&candidates[first], &candidates[second], year, options.ambiguous_month_day)?;
            let order = if md.month_first { Order::new(a.year, first, second) } else { Order::new(a.year, second, first) };
            let mut out = assign(order);
            out.warnings.extend(md.warning);
            Ok(out)
        }
        _ => {
            let want = preferred(options.ambiguous_month_day_year);
            let mut out = match valid.iter().find(|o| **o == want) {
                Some(order) => assign(*order),
                None => {
                    let mut out = assign(valid[0]);
                    out.warnings.push(format!(
                        "Preferred {} order is not a valid date; first valid reading used",
                        options.ambiguous_month_day_year.as_str()
                    ));
                    out
                }
            };
            out.warnings.insert(0, format!("Ambiguous year/month/day treated as {}", order_label(out.order)));
            Ok(out)
        }
    }
}

fn order_label(order: Order) -> &'static str {
    match (order.year, order.month, order.day) {
        (2, 0, 1) => "month_day_year",
        (2, 1, 0) => "day_month_year",
        (0, 1, 2) => "year_month_day",
        (0, 2, 1) => "year_day_month",
        (1, 0, 2) => "month_year_day",
        _ => "day_year_month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(a: &str, b: &str, c: &str) -> [Candidate; 3] {
        [Candidate::new(a), Candidate::new(b), Candidate::new(c)]
    }

    #[test]
    fn a_single_valid_reading_wins() {
        let r = analyze(&triple("87", "04", "13"), &Options::default(), 2024).unwrap();
        assert_eq!((r.year, r.month, r.day), (1987, 4, 13));
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn two_readings_with_one_year_become_a_month_day_question() {
        let r = analyze(&triple("03", "04", "32"), &Options::default(), 2024).unwrap();
        assert_eq!((r.year, r.month, r.day), (1932, 3, 4));
        assert_eq!(r.warnings, vec!["Ambiguous month/day treated as month/day".to_string()]);
    }

    #[test]
    fn many_readings_follow_the_preference() {
        let r = analyze(&triple("10", "02", "06"), &Options::default(), 2024).unwrap();
        assert_eq!((r.year, r.month, r.day), (2006, 10, 2));
        assert_eq!(r.warnings.len(), 1);

        let mut options = Options::default();
        options.set("ambiguous_month_day_year", "year_month_day").unwrap();
        let r = analyze(&triple("10", "02", "06"), &options, 2024).unwrap();
        assert_eq!((r.year, r.month, r.day), (2010, 2, 6));
    }

    #[test]
    fn no_reading_fails() {
        let err = analyze(&triple("90", "31", "29"), &Options::default(), 2024).unwrap_err();
        assert_eq!(err, Failure::MonthDayYear("90-31-29".to_string()));
    }
}
