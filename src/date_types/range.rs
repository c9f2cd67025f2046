use super::{DateCommon, DateType, Datetype, Granularity};
use chrono::NaiveDate;

/// Two dates joined by a range indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub common: DateCommon,
    pub start: Box<DateType>,
    pub end: Box<DateType>,
    /// Lexeme of the indicator (`-`, `to`, `..`).
    pub indicator: String,
}

impl Range {
    pub fn new(common: DateCommon, start: DateType, end: DateType, indicator: &str) -> Self {
        Self { common, start: Box::new(start), end: Box::new(end), indicator: indicator.to_string() }
    }

    /// `false` when the start begins after the end finishes.
    pub fn is_valid(&self) -> bool {
        match (self.start.earliest(), self.end.latest()) {
            (Some(a), Some(b)) => a <= b,
            _ => true,
        }
    }
}

impl Datetype for Range {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        None
    }

    fn base_granularity(&self) -> Granularity {
        self.start.granularity()
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        self.start.earliest()
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        self.end.latest()
    }

    fn earliest_at_granularity(&self) -> Option<String> {
        self.start.earliest_at_granularity()
    }

    fn latest_at_granularity(&self) -> Option<String> {
        self.end.latest_at_granularity()
    }

    fn is_range(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointCategory {
    Open,
    Unknown,
}

/// Missing side of a range (`1985-`, `/1985`, `..1985`).
///
/// Both categories resolve to the configured open start/end dates; the
/// category records whether the side is open-ended or merely unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub common: DateCommon,
    pub side: Side,
    pub category: EndpointCategory,
}

impl Endpoint {
    pub fn new(common: DateCommon, side: Side, category: EndpointCategory) -> Self {
        Self { common, side, category }
    }

    fn date(&self) -> NaiveDate {
        match self.side {
            Side::Start => self.common.bounds.open_start,
            Side::End => self.common.bounds.open_end,
        }
    }
}

impl Datetype for Endpoint {
    fn common(&self) -> &DateCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut DateCommon {
        &mut self.common
    }

    fn literal(&self) -> Option<i64> {
        None
    }

    fn base_granularity(&self) -> Granularity {
        Granularity::Day
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        Some(self.date())
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}
