use super::{DateCommon, Datetype, Granularity, partial_offsets};
use crate::calendar::naive_date;
use chrono::NaiveDate;

/// Early/mid/late decade offsets: 0-3, 4-6, 7-9.
const CUTS: (i64, i64, i64, i64) = (3, 4, 6, 7);

/// A decade, stored as its leading digits (`198` for the 1980s).
#[derive(Debug, Clone, PartialEq)]
pub struct Decade {
    pub common: DateCommon,
    pub decade: i64,
}

impl Decade {
    pub fn new(common: DateCommon, decade: i64) -> Self {
        Self { common, decade }
    }

    fn years(&self) -> (i64, i64) {
        let start = self.decade * 10;
        partial_offsets(self.common.partial, start, start + 9, CUTS)
    }
}

impl Datetype for Decade {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        Some(self.decade)
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

    fn decade(partial: Option<Sym>) -> Decade {
        Decade::new(DateCommon::new("", Bounds::default()).with_partial(partial), 198)
    }

    #[test]
    fn the_eighties() {
        let d = decade(None);
        assert_eq!(d.earliest_at_granularity().as_deref(), Some("1980"));
        assert_eq!(d.latest_at_granularity().as_deref(), Some("1989"));
    }

    #[test]
    fn partial_decades() {
        assert_eq!(decade(Some(Sym::Early)).latest_at_granularity().as_deref(), Some("1983"));
        let mid = decade(Some(Sym::Mid));
        assert_eq!(mid.earliest_at_granularity().as_deref(), Some("1984"));
        assert_eq!(mid.latest_at_granularity().as_deref(), Some("1986"));
        assert_eq!(decade(Some(Sym::Late)).earliest_at_granularity().as_deref(), Some("1987"));
    }
}
