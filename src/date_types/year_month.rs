use super::{DateCommon, Datetype, Granularity};
use crate::calendar::{last_day, naive_date};
use crate::model::Sym;
use chrono::NaiveDate;

/// A month of a year. Partials cover days 1-10, 11-20 and 21 to month end.
#[derive(Debug, Clone, PartialEq)]
pub struct YearMonth {
    pub common: DateCommon,
    pub year: i64,
    pub month: u32,
}

impl YearMonth {
    pub fn new(common: DateCommon, year: i64, month: u32) -> Self {
        Self { common, year, month }
    }
}

impl Datetype for YearMonth {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        Some(self.year * 100 + self.month as i64)
    }

    fn base_granularity(&self) -> Granularity {
        if self.common.partial.is_some() { Granularity::Day } else { Granularity::Month }
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        let day = match self.common.partial {
            Some(Sym::Mid) => 11,
            Some(Sym::Late) => 21,
            _ => 1,
        };
        naive_date(self.year, self.month, day)
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        match self.common.partial {
            Some(Sym::Early) => naive_date(self.year, self.month, 10),
            Some(Sym::Mid) => naive_date(self.year, self.month, 20),
            _ => last_day(self.year, self.month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_types::Bounds;

    fn ym(partial: Option<Sym>) -> YearMonth {
        YearMonth::new(DateCommon::new("", Bounds::default()).with_partial(partial), 2024, 2)
    }

    #[test]
    fn whole_month_handles_leap_years() {
        let m = ym(None);
        assert_eq!(m.literal(), Some(202402));
        assert_eq!(m.earliest_at_granularity().as_deref(), Some("2024-02"));
        assert_eq!(m.latest(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn late_month_runs_to_end() {
        let m = ym(Some(Sym::Late));
        assert_eq!(m.earliest_at_granularity().as_deref(), Some("2024-02-21"));
        assert_eq!(m.latest_at_granularity().as_deref(), Some("2024-02-29"));
        let early = ym(Some(Sym::Early));
        assert_eq!(early.latest(), NaiveDate::from_ymd_opt(2024, 2, 10));
    }
}
