//! Processing options.
//!
//! Every option is a typed field on [`Options`]. String-keyed construction
//! (`Options::set`, `Options::from_pairs`) validates eagerly so that a bad key
//! or value is reported before any input is processed.

use crate::error::OptionsError;
use chrono::NaiveDate;
use std::str::FromStr;

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            fn expected() -> String {
                Self::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().trim_start_matches(':') {
                    $( $text => Ok($name::$variant), )+
                    _ => Err(()),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }
    };
}

option_enum! {
    /// Tie-break when both numbers could be a month.
    AmbiguousMonthDay { AsMonthDay => "as_month_day", AsDayMonth => "as_day_month" }
}

option_enum! {
    /// Preferred order for fully ambiguous short triples like `10-02-06`.
    AmbiguousMonthDayYear {
        MonthDayYear => "month_day_year",
        DayMonthYear => "day_month_year",
        YearMonthDay => "year_month_day",
        YearDayMonth => "year_day_month",
    }
}

option_enum! {
    /// `2010-12`: a range of years or a month?
    AmbiguousMonthYear { AsYear => "as_year", AsMonth => "as_month" }
}

option_enum! {
    BeforeDateTreatment { Point => "point", Range => "range" }
}

option_enum! {
    /// Meaning of a hyphen at the very start of the string.
    BeginningHyphen { Unknown => "unknown", Open => "open", Edtf => "edtf" }
}

option_enum! {
    EndingHyphen { Open => "open", Unknown => "unknown" }
}

option_enum! {
    EndingSlash { Open => "open", Unknown => "unknown" }
}

option_enum! {
    SquareBracketInterpretation { InferredDate => "inferred_date", EdtfSet => "edtf_set" }
}

option_enum! {
    MismatchedBracketHandling { Absorb => "absorb", Failure => "failure" }
}

option_enum! {
    TwoDigitYearHandling { Coerce => "coerce", Literal => "literal" }
}

option_enum! {
    /// Which numbers above 12 may follow a year as a month-like component.
    MaxMonthNumberHandling { Months => "months", EdtfLevel1 => "edtf_level_1", EdtfLevel2 => "edtf_level_2" }
}

option_enum! {
    /// `1900s`: decade only, or the broadest matching period.
    PluralizedDateInterpretation { Broad => "broad", Decade => "decade" }
}

option_enum! {
    UnknownDateOutput { Orig => "orig", Custom => "custom" }
}

option_enum! {
    AndOrDateHandling { Default => "default", SingleRange => "single_range" }
}

option_enum! {
    /// Reading of a bare `c` before a date.
    CBeforeDate { Circa => "circa", Copyright => "copyright" }
}

/// Options that affect how an expression is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub ambiguous_month_day: AmbiguousMonthDay,
    pub ambiguous_month_day_year: AmbiguousMonthDayYear,
    pub ambiguous_month_year: AmbiguousMonthYear,
    /// `None` follows the reference year (its last two digits + 1).
    pub ambiguous_year_rollback_threshold: Option<u8>,
    pub before_date_treatment: BeforeDateTreatment,
    pub beginning_hyphen: BeginningHyphen,
    pub ending_hyphen: EndingHyphen,
    pub ending_slash: EndingSlash,
    pub square_bracket_interpretation: SquareBracketInterpretation,
    pub mismatched_bracket_handling: MismatchedBracketHandling,
    pub two_digit_year_handling: TwoDigitYearHandling,
    pub max_month_number_handling: MaxMonthNumberHandling,
    pub pluralized_date_interpretation: PluralizedDateInterpretation,
    pub unknown_date_output: UnknownDateOutput,
    pub unknown_date_output_string: String,
    pub open_unknown_start_date: NaiveDate,
    pub open_unknown_end_date: NaiveDate,
    pub and_or_date_handling: AndOrDateHandling,
    pub c_before_date: CBeforeDate,
}

pub const DEFAULT_OPEN_START: (i32, u32, u32) = (1583, 1, 1);
pub const DEFAULT_OPEN_END: (i32, u32, u32) = (2999, 12, 31);

impl Default for Options {
    fn default() -> Self {
        let (sy, sm, sd) = DEFAULT_OPEN_START;
        let (ey, em, ed) = DEFAULT_OPEN_END;
        Self {
            ambiguous_month_day: AmbiguousMonthDay::default(),
            ambiguous_month_day_year: AmbiguousMonthDayYear::default(),
            ambiguous_month_year: AmbiguousMonthYear::default(),
            ambiguous_year_rollback_threshold: None,
            before_date_treatment: BeforeDateTreatment::default(),
            beginning_hyphen: BeginningHyphen::default(),
            ending_hyphen: EndingHyphen::default(),
            ending_slash: EndingSlash::default(),
            square_bracket_interpretation: SquareBracketInterpretation::default(),
            mismatched_bracket_handling: MismatchedBracketHandling::default(),
            two_digit_year_handling: TwoDigitYearHandling::default(),
            max_month_number_handling: MaxMonthNumberHandling::default(),
            pluralized_date_interpretation: PluralizedDateInterpretation::default(),
            unknown_date_output: UnknownDateOutput::default(),
            unknown_date_output_string: String::new(),
            open_unknown_start_date: NaiveDate::from_ymd_opt(sy, sm, sd).unwrap_or(NaiveDate::MIN),
            open_unknown_end_date: NaiveDate::from_ymd_opt(ey, em, ed).unwrap_or(NaiveDate::MAX),
            and_or_date_handling: AndOrDateHandling::default(),
            c_before_date: CBeforeDate::default(),
        }
    }
}

/// Every key accepted by [`Options::set`].
pub const KEYS: &[&str] = &[
    "ambiguous_month_day",
    "ambiguous_month_day_year",
    "ambiguous_month_year",
    "ambiguous_year_rollback_threshold",
    "before_date_treatment",
    "beginning_hyphen",
    "ending_hyphen",
    "ending_slash",
    "square_bracket_interpretation",
    "mismatched_bracket_handling",
    "two_digit_year_handling",
    "max_month_number_handling",
    "pluralized_date_interpretation",
    "unknown_date_output",
    "unknown_date_output_string",
    "open_unknown_start_date",
    "open_unknown_end_date",
    "and_or_date_handling",
    "c_before_date",
];

fn parse_enum<T: FromStr>(key: &'static str, value: &str, expected: String) -> Result<T, OptionsError> {
    value.parse::<T>().map_err(|_| OptionsError::InvalidValue { key, value: value.to_string(), expected })
}

fn parse_date(key: &'static str, value: &str) -> Result<NaiveDate, OptionsError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| OptionsError::InvalidValue {
        key,
        value: value.to_string(),
        expected: "a YYYY-MM-DD date".to_string(),
    })
}

impl Options {
    /// Set one option from its string key and value.
    ///
    /// Cross-field constraints are checked by [`Options::validate`], which
    /// [`Options::from_pairs`] runs once every pair is applied.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionsError> {
        let key = key.trim().trim_start_matches(':');
        match key {
            "ambiguous_month_day" => {
                self.ambiguous_month_day = parse_enum("ambiguous_month_day", value, AmbiguousMonthDay::expected())?
            }
            "ambiguous_month_day_year" => {
                self.ambiguous_month_day_year =
                    parse_enum("ambiguous_month_day_year", value, AmbiguousMonthDayYear::expected())?
            }
            "ambiguous_month_year" => {
                self.ambiguous_month_year = parse_enum("ambiguous_month_year", value, AmbiguousMonthYear::expected())?
            }
            "ambiguous_year_rollback_threshold" => {
                let n: i64 = value.trim().parse().map_err(|_| OptionsError::InvalidValue {
                    key: "ambiguous_year_rollback_threshold",
                    value: value.to_string(),
                    expected: "an integer from 0 to 99".to_string(),
                })?;
                if !(0..=99).contains(&n) {
                    return Err(OptionsError::ThresholdOutOfRange(n));
                }
                self.ambiguous_year_rollback_threshold = Some(n as u8);
            }
            "before_date_treatment" => {
                self.before_date_treatment =
                    parse_enum("before_date_treatment", value, BeforeDateTreatment::expected())?
            }
            "beginning_hyphen" => {
                self.beginning_hyphen = parse_enum("beginning_hyphen", value, BeginningHyphen::expected())?
            }
            "ending_hyphen" => self.ending_hyphen = parse_enum("ending_hyphen", value, EndingHyphen::expected())?,
            "ending_slash" => self.ending_slash = parse_enum("ending_slash", value, EndingSlash::expected())?,
            "square_bracket_interpretation" => {
                self.square_bracket_interpretation =
                    parse_enum("square_bracket_interpretation", value, SquareBracketInterpretation::expected())?
            }
            "mismatched_bracket_handling" => {
                self.mismatched_bracket_handling =
                    parse_enum("mismatched_bracket_handling", value, MismatchedBracketHandling::expected())?
            }
            "two_digit_year_handling" => {
                self.two_digit_year_handling =
                    parse_enum("two_digit_year_handling", value, TwoDigitYearHandling::expected())?
            }
            "max_month_number_handling" => {
                self.max_month_number_handling =
                    parse_enum("max_month_number_handling", value, MaxMonthNumberHandling::expected())?
            }
            "pluralized_date_interpretation" => {
                self.pluralized_date_interpretation =
                    parse_enum("pluralized_date_interpretation", value, PluralizedDateInterpretation::expected())?
            }
            "unknown_date_output" => {
                self.unknown_date_output = parse_enum("unknown_date_output", value, UnknownDateOutput::expected())?
            }
            "unknown_date_output_string" => self.unknown_date_output_string = value.to_string(),
            "open_unknown_start_date" => {
                self.open_unknown_start_date = parse_date("open_unknown_start_date", value)?
            }
            "open_unknown_end_date" => {
                self.open_unknown_end_date = parse_date("open_unknown_end_date", value)?
            }
            "and_or_date_handling" => {
                self.and_or_date_handling = parse_enum("and_or_date_handling", value, AndOrDateHandling::expected())?
            }
            "c_before_date" => self.c_before_date = parse_enum("c_before_date", value, CBeforeDate::expected())?,
            other => return Err(OptionsError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Build options from `(key, value)` pairs on top of the defaults.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Options::default();
        for (key, value) in pairs {
            options.set(key, value)?;
        }
        options.validate()?;
        Ok(options)
    }

    /// Parse a single `key=value` argument (the CLI form).
    pub fn set_pair(&mut self, pair: &str) -> Result<(), OptionsError> {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(OptionsError::MalformedPair(pair.to_string()));
        };
        self.set(key, value)
    }

    /// Cross-field checks.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.open_unknown_start_date >= self.open_unknown_end_date {
            return Err(OptionsError::OpenBounds {
                start: self.open_unknown_start_date,
                end: self.open_unknown_end_date,
            });
        }
        match self.ambiguous_year_rollback_threshold {
            Some(t) if t > 99 => Err(OptionsError::ThresholdOutOfRange(t as i64)),
            _ => Ok(()),
        }?;
        Ok(())
    }

    /// Pivot used for two-digit years given the reference year.
    pub fn rollback_threshold(&self, reference_year: i32) -> i64 {
        match self.ambiguous_year_rollback_threshold {
            Some(t) => t as i64,
            None => (reference_year as i64).rem_euclid(100) + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_variants() {
        let opts = Options::default();
        assert_eq!(opts.ambiguous_month_day, AmbiguousMonthDay::AsMonthDay);
        assert_eq!(opts.ambiguous_month_year, AmbiguousMonthYear::AsYear);
        assert_eq!(opts.pluralized_date_interpretation, PluralizedDateInterpretation::Broad);
        assert_eq!(opts.open_unknown_start_date, NaiveDate::from_ymd_opt(1583, 1, 1).unwrap());
        assert_eq!(opts.open_unknown_end_date, NaiveDate::from_ymd_opt(2999, 12, 31).unwrap());
    }

    #[test]
    fn set_accepts_symbol_style_values() {
        let mut opts = Options::default();
        opts.set("ambiguous_month_day", ":as_day_month").unwrap();
        opts.set(":before_date_treatment", "range").unwrap();
        assert_eq!(opts.ambiguous_month_day, AmbiguousMonthDay::AsDayMonth);
        assert_eq!(opts.before_date_treatment, BeforeDateTreatment::Range);
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        let mut opts = Options::default();
        assert_eq!(opts.set("nope", "x"), Err(OptionsError::UnknownKey("nope".to_string())));

        let Err(OptionsError::InvalidValue { key, expected, .. }) = opts.set("ending_hyphen", "closed") else {
            panic!("expected invalid value");
        };
        assert_eq!(key, "ending_hyphen");
        assert_eq!(expected, "open, unknown");
    }

    #[test]
    fn threshold_is_range_checked() {
        let mut opts = Options::default();
        assert_eq!(opts.set("ambiguous_year_rollback_threshold", "100"), Err(OptionsError::ThresholdOutOfRange(100)));
        opts.set("ambiguous_year_rollback_threshold", "20").unwrap();
        assert_eq!(opts.rollback_threshold(2024), 20);
        assert_eq!(Options::default().rollback_threshold(2024), 25);
    }

    #[test]
    fn open_bounds_must_be_ordered() {
        let err = Options::from_pairs([("open_unknown_end_date", "1500-01-01")]).unwrap_err();
        assert!(matches!(err, OptionsError::OpenBounds { .. }));
    }

    #[test]
    fn set_pair_splits_on_equals() {
        let mut opts = Options::default();
        opts.set_pair("c_before_date=copyright").unwrap();
        assert_eq!(opts.c_before_date, CBeforeDate::Copyright);
        assert!(matches!(opts.set_pair("c_before_date"), Err(OptionsError::MalformedPair(_))));
    }
}
