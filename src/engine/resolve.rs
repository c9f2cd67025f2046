//! Date resolution.
//!
//! Once the passes reach the final shape (date segments separated by date
//! separators), resolution turns the set into user-facing [`DateType`]s:
//!
//! ```text
//! SegmentSet ── date payload of each date segment ──▶ Vec<DateType>
//!            └─ set-level qualifiers + certainty copied onto every date
//! ```
//!
//! A failed run resolves to a single `Error` date carrying the original text.

use super::Env;
use crate::date_types::{DateCommon, DateType, Datetype, ErrorDate};
use crate::error::Failure;
use crate::model::SegmentSet;

pub(crate) fn resolve(set: &SegmentSet) -> Vec<DateType> {
    let debug = std::env::var_os("DATEMEND_DEBUG_PASSES").is_some();

    let mut dates = Vec::new();
    for pos in 0..set.len() {
        let seg = set.at(pos);
        if !seg.kind.is_date_type() {
            continue;
        }
        let Some(date) = seg.date.as_deref() else {
            continue;
        };
        let mut date = date.clone();
        let common = date.common_mut();
        for q in &set.qualifiers {
            common.add_whole_qualifier(q.clone());
        }
        for c in &set.certainty {
            common.add_certainty(*c);
        }

        if debug {
            eprintln!(
                "[resolve] type={} lexeme=\"{}\" earliest={:?} latest={:?}",
                date.type_name(),
                date.lexeme(),
                date.earliest_at_granularity(),
                date.latest_at_granularity()
            );
        }
        dates.push(date);
    }
    dates
}

/// The single date reported for a failed run.
pub(crate) fn error_date(set: &SegmentSet, failure: &Failure, env: &Env) -> DateType {
    DateType::Error(ErrorDate::new(DateCommon::new(&set.orig_string, env.bounds()), failure.clone()))
}
