use crate::options::{Options, TwoDigitYearHandling};

/// Expand a one- or two-digit year.
///
/// With `coerce`, values below the rollback threshold land in the reference
/// year's century and the rest in the century before. `literal` keeps the
/// value as written.
pub(crate) fn expand(value: i64, options: &Options, reference_year: i64) -> i64 {
    match options.two_digit_year_handling {
        TwoDigitYearHandling::Literal => value,
        TwoDigitYearHandling::Coerce => {
            let threshold = options.rollback_threshold(reference_year as i32);
            let century = reference_year.div_euclid(100) * 100;
            if value < threshold { century + value } else { century - 100 + value }
        }
    }
}
