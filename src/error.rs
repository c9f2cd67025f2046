//! Error types.
//!
//! Two families live here:
//!
//! - [`Failure`]: expected, input-shaped problems. A pass that cannot continue
//!   returns one and the pipeline stops; the caller receives it inside a
//!   [`ProcessResult`](crate::ProcessResult) next to an `Error` date.
//! - [`OptionsError`]: rejected configuration, raised while options are built
//!   and before any text is processed.

use thiserror::Error;

/// Why a date string could not be processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error("untokenizable: {0}")]
    Untokenizable(String),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("mismatched brackets")]
    MismatchedBrackets,

    #[error("unsegmentable pattern: {0}")]
    Unsegmentable(String),

    #[error("no valid month/day for {0}")]
    MonthDay(String),

    #[error("no valid month/day/year permutation for {0}")]
    MonthDayYear(String),

    #[error("cannot tell month, season or year apart in {0}")]
    MonthSeasonYear(String),

    #[error("invalid calendar date {0}")]
    InvalidDate(String),
}

impl Failure {
    /// Short machine-readable tag, stable across message wording changes.
    pub fn tag(&self) -> &'static str {
        match self {
            Failure::Untokenizable(_) => "untokenizable",
            Failure::Unprocessable(_) => "unprocessable",
            Failure::MismatchedBrackets => "mismatched_brackets",
            Failure::Unsegmentable(_) => "unsegmentable",
            Failure::MonthDay(_) => "month_day_error",
            Failure::MonthDayYear(_) => "month_day_year_error",
            Failure::MonthSeasonYear(_) => "month_season_year_error",
            Failure::InvalidDate(_) => "invalid_date",
        }
    }
}

/// Rejected configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("unknown option `{0}`")]
    UnknownKey(String),

    #[error("invalid value `{value}` for `{key}` (expected {expected})")]
    InvalidValue { key: &'static str, value: String, expected: String },

    #[error("ambiguous_year_rollback_threshold must be between 0 and 99, got {0}")]
    ThresholdOutOfRange(i64),

    #[error("open_unknown_start_date {start} must be before open_unknown_end_date {end}")]
    OpenBounds { start: chrono::NaiveDate, end: chrono::NaiveDate },

    #[error("expected key=value, got `{0}`")]
    MalformedPair(String),
}
