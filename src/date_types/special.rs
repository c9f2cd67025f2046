use super::{DateCommon, Datetype, Granularity};
use crate::error::Failure;
use chrono::NaiveDate;

/// A string recognised as saying "no date" (`n.d.`, `undated`).
#[derive(Debug, Clone, PartialEq)]
pub struct KnownUnknown {
    pub common: DateCommon,
    /// Text to emit in place of a date.
    pub output: String,
}

impl KnownUnknown {
    pub fn new(common: DateCommon, output: &str) -> Self {
        Self { common, output: output.to_string() }
    }
}

impl Datetype for KnownUnknown {
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
        Granularity::Year
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        None
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        None
    }
}

/// Terminal result for input that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDate {
    pub common: DateCommon,
    pub failure: Failure,
}

impl ErrorDate {
    pub fn new(common: DateCommon, failure: Failure) -> Self {
        Self { common, failure }
    }
}

impl Datetype for ErrorDate {
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
        Granularity::Year
    }

    fn base_earliest(&self) -> Option<NaiveDate> {
        None
    }

    fn base_latest(&self) -> Option<NaiveDate> {
        None
    }
}
