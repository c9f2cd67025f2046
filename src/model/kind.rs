//! The closed vocabulary of segment types.

/// Type tag of a [`Segment`](super::Segment).
///
/// Three layers share one enum: lexer tokens, date parts produced by tagging,
/// and assembled date types produced by segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    // --- lexer tokens -------------------------------------------------------
    Number1or2,
    Number3,
    Number4,
    Number6,
    Number8,
    NumberOther,
    UncertaintyDigits,
    MonthAlpha,
    SeasonAlpha,
    DayOfWeek,
    Approximate,
    Uncertain,
    LetterC,
    LetterS,
    LetterT,
    LetterZ,
    OrdinalIndicator,
    CenturyWord,
    MillenniumWord,
    Partial,
    RangeSwitch,
    Between,
    And,
    Or,
    Filler,
    Hyphen,
    Slash,
    Comma,
    SingleDot,
    DoubleDot,
    Colon,
    Plus,
    Apostrophe,
    Space,
    Question,
    Tilde,
    Percent,
    SquareOpen,
    SquareClose,
    CurlyOpen,
    CurlyClose,
    AngleOpen,
    AngleClose,
    ParenOpen,
    ParenClose,
    Unknown,

    // --- markers introduced by passes -----------------------------------------
    RangeIndicator,
    DateSeparator,

    // --- date parts -------------------------------------------------------------
    Year,
    Month,
    Day,
    Season,
    Century,
    Decade,
    Millennium,

    // --- date types -------------------------------------------------------------
    YearDate,
    YearMonthDate,
    YearMonthDayDate,
    YearSeasonDate,
    CenturyDate,
    DecadeDate,
    MillenniumDate,
    RangeDate,
    OpenEndpoint,
    UnknownEndpoint,
    KnownUnknownDate,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Number1or2 => "number1or2",
            Kind::Number3 => "number3",
            Kind::Number4 => "number4",
            Kind::Number6 => "number6",
            Kind::Number8 => "number8",
            Kind::NumberOther => "number_other",
            Kind::UncertaintyDigits => "uncertainty_digits",
            Kind::MonthAlpha => "month_alpha",
            Kind::SeasonAlpha => "season_alpha",
            Kind::DayOfWeek => "day_of_week",
            Kind::Approximate => "approximate",
            Kind::Uncertain => "uncertain",
            Kind::LetterC => "letter_c",
            Kind::LetterS => "letter_s",
            Kind::LetterT => "letter_t",
            Kind::LetterZ => "letter_z",
            Kind::OrdinalIndicator => "ordinal_indicator",
            Kind::CenturyWord => "century",
            Kind::MillenniumWord => "millennium",
            Kind::Partial => "partial",
            Kind::RangeSwitch => "range_switch",
            Kind::Between => "between",
            Kind::And => "and",
            Kind::Or => "or",
            Kind::Filler => "filler",
            Kind::Hyphen => "hyphen",
            Kind::Slash => "slash",
            Kind::Comma => "comma",
            Kind::SingleDot => "single_dot",
            Kind::DoubleDot => "double_dot",
            Kind::Colon => "colon",
            Kind::Plus => "plus",
            Kind::Apostrophe => "apostrophe",
            Kind::Space => "space",
            Kind::Question => "question",
            Kind::Tilde => "tilde",
            Kind::Percent => "percent",
            Kind::SquareOpen => "square_bracket_open",
            Kind::SquareClose => "square_bracket_close",
            Kind::CurlyOpen => "curly_bracket_open",
            Kind::CurlyClose => "curly_bracket_close",
            Kind::AngleOpen => "angle_bracket_open",
            Kind::AngleClose => "angle_bracket_close",
            Kind::ParenOpen => "parenthesis_open",
            Kind::ParenClose => "parenthesis_close",
            Kind::Unknown => "unknown",
            Kind::RangeIndicator => "range_indicator",
            Kind::DateSeparator => "date_separator",
            Kind::Year => "year",
            Kind::Month => "month",
            Kind::Day => "day",
            Kind::Season => "season",
            Kind::Century => "century_part",
            Kind::Decade => "decade",
            Kind::Millennium => "millennium_part",
            Kind::YearDate => "year_date_type",
            Kind::YearMonthDate => "yearmonth_date_type",
            Kind::YearMonthDayDate => "yearmonthday_date_type",
            Kind::YearSeasonDate => "yearseason_date_type",
            Kind::CenturyDate => "century_date_type",
            Kind::DecadeDate => "decade_date_type",
            Kind::MillenniumDate => "millennium_date_type",
            Kind::RangeDate => "range_date_type",
            Kind::OpenEndpoint => "rangedateopen_date_type",
            Kind::UnknownEndpoint => "rangedateunknown_date_type",
            Kind::KnownUnknownDate => "knownunknown_date_type",
        }
    }

    pub fn is_number(self) -> bool {
        matches!(
            self,
            Kind::Number1or2 | Kind::Number3 | Kind::Number4 | Kind::Number6 | Kind::Number8 | Kind::NumberOther
        )
    }

    pub fn is_date_part(self) -> bool {
        matches!(
            self,
            Kind::Year | Kind::Month | Kind::Day | Kind::Season | Kind::Century | Kind::Decade | Kind::Millennium
        )
    }

    pub fn is_date_type(self) -> bool {
        matches!(
            self,
            Kind::YearDate
                | Kind::YearMonthDate
                | Kind::YearMonthDayDate
                | Kind::YearSeasonDate
                | Kind::CenturyDate
                | Kind::DecadeDate
                | Kind::MillenniumDate
                | Kind::RangeDate
                | Kind::OpenEndpoint
                | Kind::UnknownEndpoint
                | Kind::KnownUnknownDate
        )
    }

    pub fn is_open_bracket(self) -> bool {
        matches!(self, Kind::SquareOpen | Kind::CurlyOpen | Kind::AngleOpen)
    }

    pub fn is_close_bracket(self) -> bool {
        matches!(self, Kind::SquareClose | Kind::CurlyClose | Kind::AngleClose)
    }

    /// The closing kind for an opening bracket.
    pub fn closer(self) -> Option<Kind> {
        match self {
            Kind::SquareOpen => Some(Kind::SquareClose),
            Kind::CurlyOpen => Some(Kind::CurlyClose),
            Kind::AngleOpen => Some(Kind::AngleClose),
            _ => None,
        }
    }

    /// The opening kind for a closing bracket.
    pub fn opener(self) -> Option<Kind> {
        match self {
            Kind::SquareClose => Some(Kind::SquareOpen),
            Kind::CurlyClose => Some(Kind::CurlyOpen),
            Kind::AngleClose => Some(Kind::AngleOpen),
            _ => None,
        }
    }

    /// `?`, `~` and `%`.
    pub fn is_qualifier_mark(self) -> bool {
        matches!(self, Kind::Question | Kind::Tilde | Kind::Percent)
    }

    /// Segments that an unstructured qualifier may collapse into.
    pub fn accepts_qualifier(self) -> bool {
        self.is_number()
            || self.is_date_part()
            || self.is_date_type()
            || matches!(self, Kind::MonthAlpha | Kind::SeasonAlpha | Kind::Partial | Kind::RangeSwitch)
    }

    /// Depth of a date part: years 0, months and seasons 1, days 2.
    pub fn depth(self) -> Option<u8> {
        match self {
            Kind::Year | Kind::Century | Kind::Decade | Kind::Millennium => Some(0),
            Kind::Month | Kind::Season => Some(1),
            Kind::Day => Some(2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
