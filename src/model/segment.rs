use super::{Certainty, Kind, Qualifier};
use crate::date_types::DateType;

/// Arena index of a segment inside its [`SegmentSet`](super::SegmentSet).
pub type SegId = usize;

/// Symbolic literal carried by partial indicators and range switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sym {
    Early,
    Mid,
    Late,
    Before,
    After,
}

impl Sym {
    pub fn as_str(self) -> &'static str {
        match self {
            Sym::Early => "early",
            Sym::Mid => "mid",
            Sym::Late => "late",
            Sym::Before => "before",
            Sym::After => "after",
        }
    }

    pub fn is_partial(self) -> bool {
        matches!(self, Sym::Early | Sym::Mid | Sym::Late)
    }
}

/// Resolved value of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Literal {
    #[default]
    Nil,
    Int(i64),
    Sym(Sym),
}

impl Literal {
    pub fn int(self) -> Option<i64> {
        match self {
            Literal::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn sym(self) -> Option<Sym> {
        match self {
            Literal::Sym(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_nil(self) -> bool {
        matches!(self, Literal::Nil)
    }
}

/// Character span of a lexed segment in the normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub col: usize,
    pub len: usize,
}

/// A typed node in the working sequence.
#[derive(Debug, Clone)]
pub struct Segment {
    pub kind: Kind,
    pub lexeme: String,
    pub literal: Literal,
    /// Present on lexed leaves only.
    pub location: Option<Location>,
    pub certainty: Vec<Certainty>,
    pub qualifiers: Vec<Qualifier>,
    pub sources: Vec<SegId>,
    /// Payload of date-type segments.
    pub date: Option<Box<DateType>>,
}

impl Segment {
    pub fn leaf(kind: Kind, lexeme: &str, literal: Literal, location: Location) -> Self {
        Self {
            kind,
            lexeme: lexeme.to_string(),
            literal,
            location: Some(location),
            certainty: Vec::new(),
            qualifiers: Vec::new(),
            sources: Vec::new(),
            date: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn int(&self) -> Option<i64> {
        self.literal.int()
    }

    /// Numeric value, padded to digits only (a lexeme like `'85` gives 85).
    pub fn digits(&self) -> String {
        self.lexeme.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

/// Combine literals of several sources.
///
/// Only nils give nil; a lone symbol propagates; all-integer sources are
/// concatenated in decimal and re-parsed. Anything else is a pipeline bug.
pub fn derive_literal(literals: &[Literal]) -> Literal {
    let present: Vec<Literal> = literals.iter().copied().filter(|l| !l.is_nil()).collect();
    if present.is_empty() {
        return Literal::Nil;
    }

    let syms: Vec<Sym> = present.iter().filter_map(|l| l.sym()).collect();
    let ints: Vec<i64> = present.iter().filter_map(|l| l.int()).collect();

    match (syms.len(), ints.len()) {
        (1, 0) => Literal::Sym(syms[0]),
        (0, n) if n > 0 => {
            let joined: String = ints.iter().map(|i| i.to_string()).collect();
            match joined.parse::<i64>() {
                Ok(value) => Literal::Int(value),
                Err(_) => panic!("cannot derive integer literal from {ints:?}"),
            }
        }
        _ => panic!("cannot derive literal from mixed sources {literals:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_concatenate() {
        assert_eq!(derive_literal(&[Literal::Int(19), Literal::Nil, Literal::Int(85)]), Literal::Int(1985));
    }

    #[test]
    fn single_symbol_propagates() {
        assert_eq!(derive_literal(&[Literal::Nil, Literal::Sym(Sym::Mid)]), Literal::Sym(Sym::Mid));
        assert_eq!(derive_literal(&[Literal::Nil, Literal::Nil]), Literal::Nil);
    }

    #[test]
    #[should_panic(expected = "mixed sources")]
    fn symbol_with_integer_panics() {
        derive_literal(&[Literal::Sym(Sym::Early), Literal::Int(1985)]);
    }

    #[test]
    #[should_panic(expected = "mixed sources")]
    fn two_symbols_panic() {
        derive_literal(&[Literal::Sym(Sym::Early), Literal::Sym(Sym::Late)]);
    }
}
