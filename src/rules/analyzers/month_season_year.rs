use super::Candidate;
use crate::calendar::valid_month;
use crate::date_types::valid_season;
use crate::error::Failure;
use crate::options::{AmbiguousMonthYear, MaxMonthNumberHandling, Options};

/// Reading of the short number in `YYYY-NN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reading {
    /// A second year: `1985-86` is 1985 to 1986.
    Year(i64),
    Month(i64),
    /// An EDTF season code.
    Season(i64),
}

/// Decide what `nn` means after `year`.
///
/// `nn` can be a month (1-12), a season code (allowed by
/// `max_month_number_handling`), or the last digits of a later year in the
/// same century. When more than one reading works, `ambiguous_month_year`
/// picks and a warning is returned.
pub(crate) fn analyze(year: i64, nn: &Candidate, options: &Options) -> Result<(Reading, Option<String>), Failure> {
    let can_month = valid_month(nn.value);
    let can_season = match options.max_month_number_handling {
        MaxMonthNumberHandling::Months => false,
        MaxMonthNumberHandling::EdtfLevel1 => valid_season(nn.value, false),
        MaxMonthNumberHandling::EdtfLevel2 => valid_season(nn.value, true),
    };
    let second_year = year - year.rem_euclid(100) + nn.value;
    let can_year = nn.digits == 2 && second_year > year;

    let as_part = if can_month { Reading::Month(nn.value) } else { Reading::Season(nn.value) };
    match (can_month || can_season, can_year) {
        (false, false) => Err(Failure::MonthSeasonYear(format!("{}-{}", year, nn.lexeme))),
        (false, true) => Ok((Reading::Year(second_year), None)),
        (true, false) => Ok((as_part, None)),
        (true, true) => Ok(match options.ambiguous_month_year {
            AmbiguousMonthYear::AsYear => {
                (Reading::Year(second_year), Some("Ambiguous year/month treated as year range".to_string()))
            }
            AmbiguousMonthYear::AsMonth => (as_part, Some("Ambiguous year/month treated as month".to_string())),
        }),
    }
}
