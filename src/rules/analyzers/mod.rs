//! Disambiguation of purely numeric dates.
//!
//! Tagging hands these analyzers the numbers it cannot place by position
//! alone. Each one returns an assignment (plus an optional warning when a
//! preference option broke a tie) or the matching [`Failure`](crate::error::Failure).

pub(crate) mod all_short_mdy;
pub(crate) mod month_day;
pub(crate) mod month_season_year;
pub(crate) mod short_year;

use crate::model::SegmentSet;

/// A number under analysis: its trimmed text, value and digit count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub lexeme: String,
    pub value: i64,
    pub digits: usize,
}

impl Candidate {
    pub fn at(set: &SegmentSet, pos: usize) -> Self {
        let seg = set.at(pos);
        Self {
            lexeme: seg.lexeme.trim().to_string(),
            value: seg.int().unwrap_or_default(),
            digits: seg.digits().len(),
        }
    }

    #[cfg(test)]
    pub fn new(lexeme: &str) -> Self {
        Self {
            lexeme: lexeme.to_string(),
            value: lexeme.parse().unwrap_or_default(),
            digits: lexeme.len(),
        }
    }
}
