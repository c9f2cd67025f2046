use super::{DateCommon, Datetype, Granularity, partial_offsets};
use crate::calendar::naive_date;
use chrono::NaiveDate;

const CUTS: (i64, i64, i64, i64) = (333, 334, 666, 667);

/// A millennium, stored like [`Century`](super::Century): named
/// (`2nd millennium`, 1001-2000) stores 1, plural (`1XXX`, 1000-1999) stores 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Millennium {
    pub common: DateCommon,
    pub millennium: i64,
    pub named: bool,
}

impl Millennium {
    pub fn named(common: DateCommon, millennium: i64) -> Self {
        Self { common, millennium, named: true }
    }

    pub fn plural(common: DateCommon, millennium: i64) -> Self {
        Self { common, millennium, named: false }
    }

    fn years(&self) -> (i64, i64) {
        let start = self.millennium * 1000 + if self.named { 1 } else { 0 };
        partial_offsets(self.common.partial, start, start + 999, CUTS)
    }
}

impl Datetype for Millennium {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        Some(self.millennium)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_types::Bounds;
    use crate::model::Sym;

    #[test]
    fn named_and_plural() {
        let named = Millennium::named(DateCommon::new("", Bounds::default()), 1);
        assert_eq!(named.earliest_at_granularity().as_deref(), Some("1001"));
        assert_eq!(named.latest_at_granularity().as_deref(), Some("2000"));

        let plural = Millennium::plural(DateCommon::new("", Bounds::default()), 1);
        assert_eq!(plural.earliest_at_granularity().as_deref(), Some("1000"));
        assert_eq!(plural.latest_at_granularity().as_deref(), Some("1999"));
    }

    #[test]
    fn early_millennium() {
        let m = Millennium::plural(DateCommon::new("", Bounds::default()).with_partial(Some(Sym::Early)), 1);
        assert_eq!(m.latest_at_granularity().as_deref(), Some("1333"));
    }
}
