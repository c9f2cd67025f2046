//! Resolved date values.
//!
//! Each concrete type embeds a [`DateCommon`] (lexeme, parts, partial
//! indicator, range switch, qualifiers) and implements [`Datetype`] by
//! supplying its own *base* bounds. The trait's default methods layer the
//! shared behaviour on top:
//!
//! ```text
//!   base_earliest / base_latest          (type-specific arithmetic, partial applied)
//!             │
//!             ├─ switch = before ──▶ day before base_earliest
//!             │                      (earliest = open start when before_date_treatment = range)
//!             ├─ switch = after  ──▶ day after base_latest .. open end
//!             └─ none            ──▶ unchanged
//!             │
//!             v
//!   earliest / latest ──▶ *_at_granularity (YYYY, YYYY-MM or YYYY-MM-DD)
//! ```
//!
//! [`Qualifiable`] is blanket-implemented for every [`Datetype`].

#[path = "date_types/century.rs"]
mod century;
#[path = "date_types/common.rs"]
mod common;
#[path = "date_types/decade.rs"]
mod decade;
#[path = "date_types/millennium.rs"]
mod millennium;
#[path = "date_types/range.rs"]
mod range;
#[path = "date_types/special.rs"]
mod special;
#[path = "date_types/year.rs"]
mod year;
#[path = "date_types/year_month.rs"]
mod year_month;
#[path = "date_types/year_month_day.rs"]
mod year_month_day;
#[path = "date_types/year_season.rs"]
mod year_season;

pub use century::Century;
pub use common::{Bounds, DateCommon, Part, PartQualifier};
pub use decade::Decade;
pub use millennium::Millennium;
pub use range::{Endpoint, EndpointCategory, Range, Side};
pub use special::{ErrorDate, KnownUnknown};
pub use year::Year;
pub use year_month::YearMonth;
pub use year_month_day::YearMonthDay;
pub use year_season::YearSeason;
pub(crate) use year_season::valid_season;

use crate::model::{Kind, Qualifier, QualifierType, Sym};
use crate::options::BeforeDateTreatment;
use chrono::{Datelike, NaiveDate};

/// Precision of a formatted bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Granularity {
    Year,
    Month,
    Day,
}

impl Granularity {
    pub fn format(self, date: NaiveDate) -> String {
        match self {
            Granularity::Year => format!("{:04}", date.year()),
            Granularity::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Granularity::Day => format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
        }
    }
}

/// Shared behaviour of every resolved date.
pub trait Datetype {
    fn common(&self) -> &DateCommon;

    fn common_mut(&mut self) -> &mut DateCommon;

    /// Type-specific numeric encoding (e.g. `198506` for June 1985).
    fn literal(&self) -> Option<i64>;

    fn base_granularity(&self) -> Granularity;

    /// Earliest day before any range switch is applied.
    fn base_earliest(&self) -> Option<NaiveDate>;

    /// Latest day before any range switch is applied.
    fn base_latest(&self) -> Option<NaiveDate>;

    fn earliest(&self) -> Option<NaiveDate> {
        let common = self.common();
        match common.switch {
            Some(Sym::Before) => match common.bounds.before {
                BeforeDateTreatment::Point => self.base_earliest()?.pred_opt(),
                BeforeDateTreatment::Range => Some(common.bounds.open_start),
            },
            Some(Sym::After) => self.base_latest()?.succ_opt(),
            _ => self.base_earliest(),
        }
    }

    fn latest(&self) -> Option<NaiveDate> {
        let common = self.common();
        match common.switch {
            Some(Sym::Before) => self.base_earliest()?.pred_opt(),
            Some(Sym::After) => Some(common.bounds.open_end),
            _ => self.base_latest(),
        }
    }

    fn granularity(&self) -> Granularity {
        if self.common().switch.is_some() { Granularity::Day } else { self.base_granularity() }
    }

    fn earliest_at_granularity(&self) -> Option<String> {
        self.earliest().map(|d| self.granularity().format(d))
    }

    fn latest_at_granularity(&self) -> Option<String> {
        self.latest().map(|d| self.granularity().format(d))
    }

    fn lexeme(&self) -> &str {
        &self.common().lexeme
    }

    fn is_range(&self) -> bool {
        let common = self.common();
        match common.switch {
            Some(Sym::After) => true,
            Some(Sym::Before) => common.bounds.before == BeforeDateTreatment::Range,
            _ => false,
        }
    }

    fn partial(&self) -> Option<Sym> {
        self.common().partial
    }

    fn range_switch(&self) -> Option<Sym> {
        self.common().switch
    }
}

/// Qualifier queries over a date's whole-value qualifiers.
pub trait Qualifiable {
    fn qualifiers(&self) -> &[Qualifier];

    fn part_qualifiers(&self) -> &[PartQualifier];

    fn has_qualifier(&self, kind: QualifierType) -> bool {
        self.qualifiers().iter().any(|q| q.kind == kind)
    }

    fn certain(&self) -> bool {
        self.qualifiers().is_empty()
    }

    fn approximate(&self) -> bool {
        self.has_qualifier(QualifierType::Approximate)
    }

    fn uncertain(&self) -> bool {
        self.has_qualifier(QualifierType::Uncertain)
    }

    fn approximate_and_uncertain(&self) -> bool {
        self.has_qualifier(QualifierType::ApproximateAndUncertain)
    }

    fn inferred(&self) -> bool {
        self.has_qualifier(QualifierType::Inferred)
    }

    fn temporary(&self) -> bool {
        self.has_qualifier(QualifierType::Temporary)
    }

    /// Whether the part of kind `part` carries `kind`, either through a
    /// whole-value qualifier or a directional part qualifier covering it.
    fn part_qualified(&self, part: Kind, kind: QualifierType) -> bool {
        if self.has_qualifier(kind) {
            return true;
        }
        let Some(depth) = part.depth() else {
            return false;
        };
        self.part_qualifiers().iter().any(|pq| pq.qualifier.kind == kind && pq.covers(depth))
    }
}

impl<T: Datetype + ?Sized> Qualifiable for T {
    fn qualifiers(&self) -> &[Qualifier] {
        &self.common().qualifiers
    }

    fn part_qualifiers(&self) -> &[PartQualifier] {
        &self.common().part_qualifiers
    }
}

/// Any resolved date.
#[derive(Debug, Clone, PartialEq)]
pub enum DateType {
    Year(Year),
    YearMonth(YearMonth),
    YearMonthDay(YearMonthDay),
    YearSeason(YearSeason),
    Century(Century),
    Decade(Decade),
    Millennium(Millennium),
    Range(Range),
    Endpoint(Endpoint),
    KnownUnknown(KnownUnknown),
    Error(ErrorDate),
}

impl DateType {
    fn inner(&self) -> &dyn Datetype {
        match self {
            DateType::Year(d) => d,
            DateType::YearMonth(d) => d,
            DateType::YearMonthDay(d) => d,
            DateType::YearSeason(d) => d,
            DateType::Century(d) => d,
            DateType::Decade(d) => d,
            DateType::Millennium(d) => d,
            DateType::Range(d) => d,
            DateType::Endpoint(d) => d,
            DateType::KnownUnknown(d) => d,
            DateType::Error(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Datetype {
        match self {
            DateType::Year(d) => d,
            DateType::YearMonth(d) => d,
            DateType::YearMonthDay(d) => d,
            DateType::YearSeason(d) => d,
            DateType::Century(d) => d,
            DateType::Decade(d) => d,
            DateType::Millennium(d) => d,
            DateType::Range(d) => d,
            DateType::Endpoint(d) => d,
            DateType::KnownUnknown(d) => d,
            DateType::Error(d) => d,
        }
    }

    /// Segment kind a date of this type is stored under.
    pub fn kind(&self) -> Kind {
        match self {
            DateType::Year(_) => Kind::YearDate,
            DateType::YearMonth(_) => Kind::YearMonthDate,
            DateType::YearMonthDay(_) => Kind::YearMonthDayDate,
            DateType::YearSeason(_) => Kind::YearSeasonDate,
            DateType::Century(_) => Kind::CenturyDate,
            DateType::Decade(_) => Kind::DecadeDate,
            DateType::Millennium(_) => Kind::MillenniumDate,
            DateType::Range(_) => Kind::RangeDate,
            DateType::Endpoint(e) => match e.category {
                EndpointCategory::Open => Kind::OpenEndpoint,
                EndpointCategory::Unknown => Kind::UnknownEndpoint,
            },
            DateType::KnownUnknown(_) => Kind::KnownUnknownDate,
            DateType::Error(_) => Kind::Unknown,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DateType::Year(_) => "Year",
            DateType::YearMonth(_) => "YearMonth",
            DateType::YearMonthDay(_) => "YearMonthDay",
            DateType::YearSeason(_) => "YearSeason",
            DateType::Century(_) => "Century",
            DateType::Decade(_) => "Decade",
            DateType::Millennium(_) => "Millennium",
            DateType::Range(_) => "Range",
            DateType::Endpoint(e) => match e.category {
                EndpointCategory::Open => "RangeDateOpen",
                EndpointCategory::Unknown => "RangeDateUnknown",
            },
            DateType::KnownUnknown(_) => "KnownUnknown",
            DateType::Error(_) => "Error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DateType::Error(_))
    }
}

impl Datetype for DateType {
    fn common(&self) -> &DateCommon {
        self.inner().common()
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        self.inner_mut().common_mut()
    }

    fn literal(&self) -> Option<i64> {
        self.inner().literal()
    }

    fn base_granularity(&self) -> Granularity {
        self.inner().base_granularity()
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        self.inner().base_earliest()
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        self.inner().base_latest()
    }

    fn earliest(&self) -> Option<NaiveDate> {
        self.inner().earliest()
    }

    fn latest(&self) -> Option<NaiveDate> {
        self.inner().latest()
    }

    fn granularity(&self) -> Granularity {
        self.inner().granularity()
    }

    fn earliest_at_granularity(&self) -> Option<String> {
        self.inner().earliest_at_granularity()
    }

    fn latest_at_granularity(&self) -> Option<String> {
        self.inner().latest_at_granularity()
    }

    fn lexeme(&self) -> &str {
        self.inner().lexeme()
    }

    fn is_range(&self) -> bool {
        self.inner().is_range()
    }
}

/// Split `[start, end]` into early/mid/late sub-spans using fixed offsets
/// from `start`.
pub(crate) fn partial_offsets(partial: Option<Sym>, start: i64, end: i64, cuts: (i64, i64, i64, i64)) -> (i64, i64) {
    let (early_end, mid_start, mid_end, late_start) = cuts;
    match partial {
        Some(Sym::Early) => (start, start + early_end),
        Some(Sym::Mid) => (start + mid_start, start + mid_end),
        Some(Sym::Late) => (start + late_start, end),
        _ => (start, end),
    }
}
