use super::{DateCommon, Datetype, Granularity};
use crate::calendar::naive_date;
use crate::model::Sym;
use chrono::NaiveDate;

/// A calendar year.
///
/// Partial indicators split the year into Jan-Apr, May-Aug and Sep-Dec.
#[derive(Debug, Clone, PartialEq)]
pub struct Year {
    pub common: DateCommon,
    pub year: i64,
}

impl Year {
    pub fn new(common: DateCommon, year: i64) -> Self {
        Self { common, year }
    }
}

impl Datetype for Year {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        Some(self.year)
    }

    fn base_granularity(&self) -> Granularity {
        if self.common.partial.is_some() { Granularity::Month } else { Granularity::Year }
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        let month = match self.common.partial {
            Some(Sym::Mid) => 5,
            Some(Sym::Late) => 9,
            _ => 1,
        };
        naive_date(self.year, month, 1)
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        let (month, day) = match self.common.partial {
            Some(Sym::Early) => (4, 30),
            Some(Sym::Mid) => (8, 31),
            _ => (12, 31),
        };
        naive_date(self.year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_types::Bounds;
    use crate::options::BeforeDateTreatment;

    fn year(y: i64, partial: Option<Sym>, switch: Option<Sym>) -> Year {
        Year::new(DateCommon::new("", Bounds::default()).with_partial(partial).with_switch(switch), y)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn whole_year() {
        let y = year(1985, None, None);
        assert_eq!(y.earliest(), Some(d(1985, 1, 1)));
        assert_eq!(y.latest(), Some(d(1985, 12, 31)));
        assert_eq!(y.earliest_at_granularity().as_deref(), Some("1985"));
        assert!(!y.is_range());
    }

    #[test]
    fn partial_years() {
        let early = year(1985, Some(Sym::Early), None);
        assert_eq!((early.earliest(), early.latest()), (Some(d(1985, 1, 1)), Some(d(1985, 4, 30))));
        let mid = year(1985, Some(Sym::Mid), None);
        assert_eq!((mid.earliest(), mid.latest()), (Some(d(1985, 5, 1)), Some(d(1985, 8, 31))));
        let late = year(1985, Some(Sym::Late), None);
        assert_eq!(late.latest_at_granularity().as_deref(), Some("1985-12"));
    }

    #[test]
    fn before_as_point_and_as_range() {
        let point = year(1950, None, Some(Sym::Before));
        assert_eq!(point.earliest(), Some(d(1949, 12, 31)));
        assert_eq!(point.latest(), Some(d(1949, 12, 31)));
        assert!(!point.is_range());

        let mut ranged = year(1950, None, Some(Sym::Before));
        ranged.common.bounds.before = BeforeDateTreatment::Range;
        assert_eq!(ranged.earliest(), Some(d(1583, 1, 1)));
        assert_eq!(ranged.latest(), Some(d(1949, 12, 31)));
        assert!(ranged.is_range());
    }

    #[test]
    fn after_runs_to_open_end() {
        let after = year(1950, None, Some(Sym::After));
        assert_eq!(after.earliest(), Some(d(1951, 1, 1)));
        assert_eq!(after.latest(), Some(d(2999, 12, 31)));
        assert_eq!(after.earliest_at_granularity().as_deref(), Some("1951-01-01"));
        assert!(after.is_range());
    }
}
