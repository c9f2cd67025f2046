use super::{DateCommon, Datetype, Granularity};
use crate::calendar::naive_date;
use chrono::NaiveDate;

/// A single day.
#[derive(Debug, Clone, PartialEq)]
pub struct YearMonthDay {
    pub common: DateCommon,
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl YearMonthDay {
    pub fn new(common: DateCommon, year: i64, month: u32, day: u32) -> Self {
        Self { common, year, month, day }
    }
}

impl Datetype for YearMonthDay {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        Some(self.year * 10_000 + self.month as i64 * 100 + self.day as i64)
    }

    fn base_granularity(&self) -> Granularity {
        Granularity::Day
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        naive_date(self.year, self.month, self.day)
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        self.base_earliest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_types::Bounds;

    #[test]
    fn point_in_time() {
        let d = YearMonthDay::new(DateCommon::new("2020-02-03", Bounds::default()), 2020, 2, 3);
        assert_eq!(d.literal(), Some(20200203));
        assert_eq!(d.earliest(), d.latest());
        assert_eq!(d.earliest_at_granularity().as_deref(), Some("2020-02-03"));
    }
}
