use crate::model::{Derive, Kind, Literal, Qualifier, SegId, SegmentSet, push_unique};

/// Alphabetic tokens that may carry a trailing abbreviation dot.
pub fn is_word(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::MonthAlpha
            | Kind::SeasonAlpha
            | Kind::DayOfWeek
            | Kind::Approximate
            | Kind::Uncertain
            | Kind::LetterC
            | Kind::LetterS
            | Kind::OrdinalIndicator
            | Kind::CenturyWord
            | Kind::MillenniumWord
            | Kind::Partial
            | Kind::RangeSwitch
            | Kind::Between
            | Kind::And
            | Kind::Or
            | Kind::Filler
            | Kind::RangeIndicator
    )
}

/// Collapse the segment at `pos` into the one after it.
pub fn absorb_forward(set: &mut SegmentSet, pos: usize) -> SegId {
    set.absorb(pos + 1, pos)
}

/// Collapse the segment at `pos` into the one before it.
pub fn absorb_backward(set: &mut SegmentSet, pos: usize) -> SegId {
    set.absorb(pos - 1, pos)
}

/// Collapse a stray marker into whichever neighbour exists, preferring `forward`.
pub fn absorb_either(set: &mut SegmentSet, pos: usize, forward: bool) -> Option<SegId> {
    let has_next = pos + 1 < set.len();
    let has_prev = pos > 0;
    match (forward, has_next, has_prev) {
        (true, true, _) | (false, true, false) => Some(absorb_forward(set, pos)),
        (false, _, true) | (true, false, true) => Some(absorb_backward(set, pos)),
        _ => None,
    }
}

pub fn qualify(set: &mut SegmentSet, pos: usize, qualifier: Qualifier) {
    push_unique(&mut set.at_mut(pos).qualifiers, qualifier);
}

/// First `?`, `~` or `%` in a lexeme.
pub fn mark_of(lexeme: &str) -> Option<char> {
    lexeme.chars().find(|c| matches!(c, '?' | '~' | '%'))
}

pub fn value_at(set: &SegmentSet, pos: usize) -> i64 {
    set.at(pos).int().unwrap_or_default()
}

/// Retype the segment at `pos` as a date part with an explicit value.
pub fn tag(set: &mut SegmentSet, pos: usize, kind: Kind, value: i64) -> SegId {
    set.retype_with(pos, kind, Literal::Int(value))
}

/// Collapse `start..end` into one date part with an explicit value.
pub fn tag_span(set: &mut SegmentSet, start: usize, end: usize, kind: Kind, value: i64) -> SegId {
    set.replace(start..end, kind, Derive::literal(Literal::Int(value)))
}

pub fn kind_is(set: &SegmentSet, pos: usize, kinds: &[Kind]) -> bool {
    set.kind_at(pos).map(|k| kinds.contains(&k)).unwrap_or(false)
}

pub fn is_number_at(set: &SegmentSet, pos: usize) -> bool {
    set.kind_at(pos).map(Kind::is_number).unwrap_or(false)
}

/// Trimmed lexemes of `positions`, space-joined, for failure messages.
pub fn describe(set: &SegmentSet, positions: &[usize]) -> String {
    positions.iter().map(|p| set.at(*p).lexeme.trim().to_string()).collect::<Vec<_>>().join(" ")
}
