use super::{DateCommon, Datetype, Granularity, partial_offsets};
use crate::calendar::naive_date;
use chrono::NaiveDate;

/// Early/mid/late century offsets from the first year: 0-33, 34-66, 67-99.
const CUTS: (i64, i64, i64, i64) = (33, 34, 66, 67);

/// A century.
///
/// `century` is the count of completed centuries: the named form
/// (`19th century`) stores 18 and spans 1801-1900; the plural form (`1900s`,
/// `19XX`) stores 19 and spans 1900-1999.
#[derive(Debug, Clone, PartialEq)]
pub struct Century {
    pub common: DateCommon,
    pub century: i64,
    pub named: bool,
}

impl Century {
    pub fn named(common: DateCommon, century: i64) -> Self {
        Self { common, century, named: true }
    }

    pub fn plural(common: DateCommon, century: i64) -> Self {
        Self { common, century, named: false }
    }

    fn years(&self) -> (i64, i64) {
        let start = self.century * 100 + if self.named { 1 } else { 0 };
        partial_offsets(self.common.partial, start, start + 99, CUTS)
    }
}

impl Datetype for Century {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        Some(self.century)
    }

    fn base_granularity(&self) -> Granularity {
        Granularity::Year
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        naive_date(self.years().0, 1, 1)
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        naive_date(self.years().1, 12, 31)
    }
}
