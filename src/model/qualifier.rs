//! Qualifier and certainty annotations.

/// What a qualifier says about a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierType {
    Approximate,
    Uncertain,
    ApproximateAndUncertain,
    Inferred,
    Temporary,
}

impl QualifierType {
    pub fn as_str(self) -> &'static str {
        match self {
            QualifierType::Approximate => "approximate",
            QualifierType::Uncertain => "uncertain",
            QualifierType::ApproximateAndUncertain => "approximate_and_uncertain",
            QualifierType::Inferred => "inferred",
            QualifierType::Temporary => "temporary",
        }
    }

    /// Type carried by an EDTF punctuation mark.
    pub fn from_mark(mark: char) -> Option<Self> {
        match mark {
            '?' => Some(QualifierType::Uncertain),
            '~' => Some(QualifierType::Approximate),
            '%' => Some(QualifierType::ApproximateAndUncertain),
            _ => None,
        }
    }
}

/// Scope of a qualifier relative to the segment it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Whole,
    Leftward,
    Rightward,
    SingleSegment,
    Beginning,
    End,
}

impl Precision {
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Whole => "whole",
            Precision::Leftward => "leftward",
            Precision::Rightward => "rightward",
            Precision::SingleSegment => "single_segment",
            Precision::Beginning => "beginning",
            Precision::End => "end",
        }
    }

    /// Whether the scope always means the whole value once a date is assembled.
    pub fn is_wholesale(self) -> bool {
        matches!(self, Precision::Whole | Precision::Beginning | Precision::End)
    }
}

/// An approximate/uncertain/inferred/temporary annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Qualifier {
    pub kind: QualifierType,
    pub precision: Precision,
    /// Triggering text with punctuation and surrounding whitespace removed.
    pub lexeme: String,
}

impl Qualifier {
    pub fn new(kind: QualifierType, precision: Precision, lexeme: &str) -> Self {
        let lexeme = lexeme.chars().filter(|c| c.is_alphanumeric() || c.is_whitespace()).collect::<String>();
        Self { kind, precision, lexeme: lexeme.trim().to_string() }
    }

    /// Composite identity used for de-duplication.
    pub fn signature(&self) -> String {
        format!("{} {} {}", self.kind.as_str(), self.precision.as_str(), self.lexeme)
    }

    pub fn with_precision(&self, precision: Precision) -> Self {
        Self { kind: self.kind, precision, lexeme: self.lexeme.clone() }
    }
}

/// Append `q` unless a qualifier with the same signature is present.
pub fn push_unique(list: &mut Vec<Qualifier>, q: Qualifier) {
    if !list.iter().any(|existing| existing.signature() == q.signature()) {
        list.push(q);
    }
}

/// Lightweight tag attached to a segment or a whole result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Certainty {
    Approximate,
    Uncertain,
    ApproximateAndUncertain,
    Inferred,
    LeftwardApproximate,
    LeftwardUncertain,
    LeftwardApproximateAndUncertain,
    OneOfSet,
    AllOfSet,
}

impl Certainty {
    pub fn as_str(self) -> &'static str {
        match self {
            Certainty::Approximate => "approximate",
            Certainty::Uncertain => "uncertain",
            Certainty::ApproximateAndUncertain => "approximate_and_uncertain",
            Certainty::Inferred => "inferred",
            Certainty::LeftwardApproximate => "leftward_approximate",
            Certainty::LeftwardUncertain => "leftward_uncertain",
            Certainty::LeftwardApproximateAndUncertain => "leftward_approximate_and_uncertain",
            Certainty::OneOfSet => "one_of_set",
            Certainty::AllOfSet => "all_of_set",
        }
    }

    /// Leftward tag for an EDTF punctuation mark.
    pub fn leftward_from_mark(mark: char) -> Option<Self> {
        match mark {
            '?' => Some(Certainty::LeftwardUncertain),
            '~' => Some(Certainty::LeftwardApproximate),
            '%' => Some(Certainty::LeftwardApproximateAndUncertain),
            _ => None,
        }
    }

    /// The directional qualifier a leftward tag stands for, if any.
    pub fn as_leftward_qualifier(self) -> Option<Qualifier> {
        let kind = match self {
            Certainty::LeftwardApproximate => QualifierType::Approximate,
            Certainty::LeftwardUncertain => QualifierType::Uncertain,
            Certainty::LeftwardApproximateAndUncertain => QualifierType::ApproximateAndUncertain,
            _ => return None,
        };
        Some(Qualifier::new(kind, Precision::Leftward, ""))
    }
}

pub fn push_certainty(list: &mut Vec<Certainty>, c: Certainty) {
    if !list.contains(&c) {
        list.push(c);
    }
}

/// Multi-value set semantics (`1997 or 1999`, `{1997, 1999}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetType {
    Alternate,
    Inclusive,
}

impl SetType {
    pub fn as_str(self) -> &'static str {
        match self {
            SetType::Alternate => "alternate",
            SetType::Inclusive => "inclusive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexeme_is_punctuation_stripped() {
        let q = Qualifier::new(QualifierType::Approximate, Precision::Whole, " ca. ");
        assert_eq!(q.lexeme, "ca");
        let q = Qualifier::new(QualifierType::Uncertain, Precision::Leftward, "?");
        assert_eq!(q.lexeme, "");
    }

    #[test]
    fn push_unique_dedups_by_signature() {
        let mut list = Vec::new();
        push_unique(&mut list, Qualifier::new(QualifierType::Inferred, Precision::SingleSegment, "["));
        push_unique(&mut list, Qualifier::new(QualifierType::Inferred, Precision::SingleSegment, "]"));
        push_unique(&mut list, Qualifier::new(QualifierType::Inferred, Precision::Whole, "["));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn leftward_tags_map_to_qualifiers() {
        let tag = Certainty::leftward_from_mark('%').unwrap();
        let q = tag.as_leftward_qualifier().unwrap();
        assert_eq!(q.kind, QualifierType::ApproximateAndUncertain);
        assert_eq!(q.precision, Precision::Leftward);
        assert!(Certainty::OneOfSet.as_leftward_qualifier().is_none());
    }
}
