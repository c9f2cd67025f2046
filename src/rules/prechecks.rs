//! Whole-string checks that run before lexing.
//!
//! Some inputs are recognised as a unit: "no date" phrases become a
//! `KnownUnknown` date, and era or exponent notations that the pipeline does
//! not model are rejected up front with a clear reason instead of an
//! "untokenizable" failure.

use crate::date_types::{DateCommon, DateType, KnownUnknown};
use crate::engine::Env;
use crate::error::Failure;
use crate::options::UnknownDateOutput;

pub(crate) fn check(text: &str, env: &Env) -> Option<Result<DateType, Failure>> {
    let trimmed = text.trim();

    if is_known_unknown(trimmed) {
        let output = match env.options.unknown_date_output {
            UnknownDateOutput::Orig => text,
            UnknownDateOutput::Custom => env.options.unknown_date_output_string.as_str(),
        };
        let common = DateCommon::new(trimmed, env.bounds());
        return Some(Ok(DateType::KnownUnknown(KnownUnknown::new(common, output))));
    }

    if regex!(r"(?i)(?:^|[\s\d])b\.?\s?c\.?(?:e\.?)?(?:\s|$)").is_match(trimmed) {
        return Some(Err(Failure::Unprocessable("BCE date".to_string())));
    }
    if regex!(r"^[Yy]-?\d{5,}").is_match(trimmed) {
        return Some(Err(Failure::Unprocessable("exponential year".to_string())));
    }
    None
}

fn is_known_unknown(text: &str) -> bool {
    regex!(
        r"(?i)^[\[(]?\s*(?:n\.?\s?d\.?|no\s+date|not\s+dated|undated|date\s+unknown|unknown\s+date|unknown)\s*[\])]?$"
    )
    .is_match(text)
}
