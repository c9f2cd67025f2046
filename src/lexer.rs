//! Input normalization and tokenization.
//!
//! The lexer turns a normalized string into leaf [`Segment`]s. It only
//! classifies characters and known words; every structural decision is left to
//! the rewrite passes.
//!
//! Words are matched case-insensitively against a fixed vocabulary. A word
//! outside it makes the whole input untokenizable.

use crate::error::Failure;
use crate::model::{Kind, Literal, Location, Segment, SegmentSet, Sym};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static WORDS: Lazy<HashMap<&'static str, (Kind, Literal)>> = Lazy::new(|| {
    let mut m = HashMap::new();

    let months = [
        ("january", 1),
        ("jan", 1),
        ("february", 2),
        ("feb", 2),
        ("march", 3),
        ("mar", 3),
        ("april", 4),
        ("apr", 4),
        ("may", 5),
        ("june", 6),
        ("jun", 6),
        ("july", 7),
        ("jul", 7),
        ("august", 8),
        ("aug", 8),
        ("september", 9),
        ("sep", 9),
        ("sept", 9),
        ("october", 10),
        ("oct", 10),
        ("november", 11),
        ("nov", 11),
        ("december", 12),
        ("dec", 12),
    ];
    for (word, n) in months {
        m.insert(word, (Kind::MonthAlpha, Literal::Int(n)));
    }

    for (word, code) in [("spring", 21), ("summer", 22), ("autumn", 23), ("fall", 23), ("winter", 24)] {
        m.insert(word, (Kind::SeasonAlpha, Literal::Int(code)));
    }

    for word in ["circa", "ca", "approx", "approximately", "about", "around", "roughly", "est", "estimated", "cca"] {
        m.insert(word, (Kind::Approximate, Literal::Nil));
    }
    for word in ["possibly", "probably", "perhaps", "maybe", "likely", "presumably", "questionable"] {
        m.insert(word, (Kind::Uncertain, Literal::Nil));
    }

    for (word, sym) in [("early", Sym::Early), ("mid", Sym::Mid), ("middle", Sym::Mid), ("late", Sym::Late)] {
        m.insert(word, (Kind::Partial, Literal::Sym(sym)));
    }
    for (word, sym) in [
        ("before", Sym::Before),
        ("pre", Sym::Before),
        ("prior", Sym::Before),
        ("after", Sym::After),
        ("post", Sym::After),
        ("since", Sym::After),
    ] {
        m.insert(word, (Kind::RangeSwitch, Literal::Sym(sym)));
    }

    for word in ["to", "through", "thru", "until", "till"] {
        m.insert(word, (Kind::RangeIndicator, Literal::Nil));
    }
    m.insert("between", (Kind::Between, Literal::Nil));
    m.insert("and", (Kind::And, Literal::Nil));
    m.insert("or", (Kind::Or, Literal::Nil));

    for word in ["century", "centuries", "cent"] {
        m.insert(word, (Kind::CenturyWord, Literal::Nil));
    }
    for word in ["millennium", "millenium", "millennia"] {
        m.insert(word, (Kind::MillenniumWord, Literal::Nil));
    }

    for word in ["of", "the", "in", "on", "ad", "ce"] {
        m.insert(word, (Kind::Filler, Literal::Nil));
    }
    for word in [
        "monday", "mon", "tuesday", "tue", "tues", "wednesday", "wed", "thursday", "thu", "thur", "thurs", "friday",
        "fri", "saturday", "sat", "sunday", "sun",
    ] {
        m.insert(word, (Kind::DayOfWeek, Literal::Nil));
    }

    m.insert("c", (Kind::LetterC, Literal::Nil));
    m.insert("s", (Kind::LetterS, Literal::Nil));
    m.insert("t", (Kind::LetterT, Literal::Nil));
    m.insert("z", (Kind::LetterZ, Literal::Nil));
    m
});

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th", "d"];

fn punctuation(c: char) -> Kind {
    match c {
        '-' => Kind::Hyphen,
        '/' => Kind::Slash,
        ',' | ';' => Kind::Comma,
        '.' => Kind::SingleDot,
        ':' => Kind::Colon,
        '+' => Kind::Plus,
        '\'' => Kind::Apostrophe,
        '?' => Kind::Question,
        '~' => Kind::Tilde,
        '%' => Kind::Percent,
        '&' => Kind::And,
        '[' => Kind::SquareOpen,
        ']' => Kind::SquareClose,
        '{' => Kind::CurlyOpen,
        '}' => Kind::CurlyClose,
        '<' => Kind::AngleOpen,
        '>' => Kind::AngleClose,
        '(' => Kind::ParenOpen,
        ')' => Kind::ParenClose,
        _ => Kind::Unknown,
    }
}

fn number_kind(digits: &str) -> Kind {
    match digits.len() {
        1 | 2 => Kind::Number1or2,
        3 => Kind::Number3,
        4 => Kind::Number4,
        6 => Kind::Number6,
        8 => Kind::Number8,
        _ => Kind::NumberOther,
    }
}

/// Trim, unify dashes and apostrophes, collapse whitespace.
pub fn normalize(input: &str) -> String {
    let dashed = regex!(r"[\u{2010}-\u{2015}\u{2212}]").replace_all(input.trim(), "-");
    let quoted = regex!(r"[\u{2018}\u{2019}`]").replace_all(&dashed, "'");
    regex!(r"\s+").replace_all(&quoted, " ").into_owned()
}

/// Scan `norm` (already normalized) into a segment set.
pub fn lex(orig: &str, norm: &str) -> Result<SegmentSet, Failure> {
    let mut set = SegmentSet::new(orig, norm);
    let mut unknown: Vec<String> = Vec::new();
    let mut prev: Option<(Kind, usize)> = None;

    let scanner = regex!(r"(\d+)|([A-Za-z]+)|(\.{2,})|( )|(.)");
    for caps in scanner.captures_iter(norm) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let text = whole.as_str();
        let location = Location { col: whole.start(), len: text.len() };
        let touches_prev = prev.map(|(_, end)| end == whole.start()).unwrap_or(false);
        let prev_kind = prev.map(|(k, _)| k);

        let (kind, literal) = if caps.get(1).is_some() {
            match text.parse::<i64>() {
                Ok(n) => (number_kind(text), Literal::Int(n)),
                Err(_) => (Kind::Unknown, Literal::Nil),
            }
        } else if caps.get(2).is_some() {
            let lower = text.to_ascii_lowercase();
            let after_number = touches_prev && prev_kind.map(Kind::is_number).unwrap_or(false);
            if after_number && lower.chars().all(|c| c == 'u' || c == 'x') {
                (Kind::UncertaintyDigits, Literal::Nil)
            } else if after_number && ORDINAL_SUFFIXES.contains(&lower.as_str()) {
                (Kind::OrdinalIndicator, Literal::Nil)
            } else {
                WORDS.get(lower.as_str()).copied().unwrap_or((Kind::Unknown, Literal::Nil))
            }
        } else if caps.get(3).is_some() {
            (Kind::DoubleDot, Literal::Nil)
        } else if caps.get(4).is_some() {
            (Kind::Space, Literal::Nil)
        } else {
            (text.chars().next().map(punctuation).unwrap_or(Kind::Unknown), Literal::Nil)
        };

        if kind == Kind::Unknown {
            unknown.push(text.to_string());
        }
        set.push_leaf(Segment::leaf(kind, text, literal, location));
        prev = Some((kind, whole.end()));
    }

    if !unknown.is_empty() {
        return Err(Failure::Untokenizable(unknown.join(", ")));
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(input: &str) -> String {
        let norm = normalize(input);
        lex(input, &norm).unwrap().type_string()
    }

    #[test]
    fn normalize_unifies_dashes_and_space() {
        assert_eq!(normalize("  1985 \u{2013}  1990 "), "1985 - 1990");
        assert_eq!(normalize("\u{2019}85"), "'85");
    }

    #[test]
    fn numbers_by_length() {
        assert_eq!(types("1-12-123-1985"), "number1or2 hyphen number1or2 hyphen number3 hyphen number4");
        assert_eq!(types("198506 19850612"), "number6 space number8");
    }

    #[test]
    fn words_and_letters() {
        assert_eq!(types("circa March 1985"), "approximate space month_alpha space number4");
        assert_eq!(types("c. 1985"), "letter_c single_dot space number4");
        assert_eq!(types("1980s"), "number4 letter_s");
        assert_eq!(types("19th Century"), "number1or2 ordinal_indicator space century");
        assert_eq!(types("Mid-winter"), "partial hyphen season_alpha");
    }

    #[test]
    fn uncertainty_digits_follow_numbers() {
        assert_eq!(types("198u"), "number3 uncertainty_digits");
        assert_eq!(types("19XX"), "number1or2 uncertainty_digits");
    }

    #[test]
    fn punctuation_and_brackets() {
        assert_eq!(
            types("[1997]..{1998}?"),
            "square_bracket_open number4 square_bracket_close double_dot curly_bracket_open number4 \
             curly_bracket_close question"
        );
        assert_eq!(types("1985 & 1986"), "number4 space and space number4");
    }

    #[test]
    fn literals_and_locations() {
        let set = lex("May 1985", "May 1985").unwrap();
        assert_eq!(set.at(0).literal, Literal::Int(5));
        assert_eq!(set.at(2).literal, Literal::Int(1985));
        assert_eq!(set.at(2).location, Some(Location { col: 4, len: 4 }));
        assert_eq!(set.lexeme(), "May 1985");
    }

    #[test]
    fn unknown_words_fail() {
        let err = lex("1985 fnord", "1985 fnord").unwrap_err();
        assert_eq!(err, Failure::Untokenizable("fnord".to_string()));
    }
}
