use super::{DateCommon, Datetype, Granularity};
use crate::calendar::{last_day, naive_date};
use crate::model::Sym;
use chrono::NaiveDate;

/// Months spanned by a season code: (first month, last month, whether the
/// last month falls in the following year).
fn season_span(code: u8) -> Option<(u32, u32, bool)> {
    let span = match code {
        // EDTF level 1 seasons and level 2 northern hemisphere
        21 | 25 => (3, 5, false),
        22 | 26 => (6, 8, false),
        23 | 27 => (9, 11, false),
        24 | 28 => (12, 2, true),
        // southern hemisphere
        29 => (9, 11, false),
        30 => (12, 2, true),
        31 => (3, 5, false),
        32 => (6, 8, false),
        // quarters
        33 => (1, 3, false),
        34 => (4, 6, false),
        35 => (7, 9, false),
        36 => (10, 12, false),
        // quadrimesters
        37 => (1, 4, false),
        38 => (5, 8, false),
        39 => (9, 12, false),
        // semestrals
        40 => (1, 6, false),
        41 => (7, 12, false),
        _ => return None,
    };
    Some(span)
}

/// Whether `code` names a season at the given EDTF level.
pub(crate) fn valid_season(code: i64, level2: bool) -> bool {
    if level2 { (21..=41).contains(&code) } else { (21..=24).contains(&code) }
}

/// A season of a year, stored as its EDTF code.
///
/// Winter starts in December of `year`; with `include_prev_year` it starts in
/// December of the year before (`winter 1985-1986` is stored as 1986).
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeason {
    pub common: DateCommon,
    pub year: i64,
    pub season: u8,
    pub include_prev_year: bool,
}

impl YearSeason {
    pub fn new(common: DateCommon, year: i64, season: u8) -> Self {
        Self { common, year, season, include_prev_year: false }
    }

    pub fn including_previous_year(mut self) -> Self {
        self.include_prev_year = true;
        self
    }

    fn start_year(&self) -> i64 {
        if self.include_prev_year { self.year - 1 } else { self.year }
    }

    /// First and last month with their years, narrowed by a partial indicator
    /// on three-month seasons.
    fn months(&self) -> Option<((i64, u32), (i64, u32))> {
        let (first, last, wraps) = season_span(self.season)?;
        let start = (self.start_year(), first);
        let end = (if wraps { self.start_year() + 1 } else { self.start_year() }, last);

        let months: Vec<(i64, u32)> = {
            let mut v = Vec::new();
            let (mut y, mut m) = start;
            loop {
                v.push((y, m));
                if (y, m) == end || v.len() > 12 {
                    break;
                }
                if m == 12 {
                    y += 1;
                    m = 1;
                } else {
                    m += 1;
                }
            }
            v
        };

        if months.len() != 3 {
            return Some((start, end));
        }
        Some(match self.common.partial {
            Some(Sym::Early) => (months[0], months[0]),
            Some(Sym::Mid) => (months[1], months[1]),
            Some(Sym::Late) => (months[2], months[2]),
            _ => (start, end),
        })
    }
}

impl Datetype for YearSeason {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        Some(self.year * 100 + self.season as i64)
    }

    fn base_granularity(&self) -> Granularity {
        Granularity::Month
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        let ((y, m), _) = self.months()?;
        naive_date(y, m, 1)
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        let (_, (y, m)) = self.months()?;
        last_day(y, m)
    }
}
