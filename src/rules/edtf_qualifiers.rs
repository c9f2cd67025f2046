//! EDTF `?`, `~` and `%` marks attached to date components.
//!
//! A mark after a component qualifies it and, when it is the only mark in the
//! string, everything to its left. A mark before a component qualifies that
//! component alone.

use super::helpers::{mark_of, qualify};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Kind, Precision, Qualifier, QualifierType, SegmentSet};

static RULES: &[Rule] = &[
    rule! { name: "mark_after_component", contains: [num, mark], act: mark_after },
    rule! { name: "mark_before_component", when: find_mark_before, act: mark_before },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("edtf_qualifiers", set, RULES, env)
}

fn find_mark_before(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let kinds = set.kinds();
    (0..kinds.len().saturating_sub(1))
        .find(|p| {
            let opens = *p == 0
                || matches!(kinds[p - 1], Kind::Hyphen | Kind::Slash | Kind::DoubleDot | Kind::Comma)
                || kinds[p - 1].is_open_bracket();
            opens && kinds[*p].is_qualifier_mark() && kinds[p + 1].is_number()
        })
        .map(|start| Hit { start, len: 2 })
}

fn mark_type(set: &SegmentSet, pos: usize) -> Option<QualifierType> {
    mark_of(&set.at(pos).lexeme).and_then(QualifierType::from_mark)
}

fn mark_after(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let Some(kind) = mark_type(set, hit.pos(1)) else {
        return Ok(());
    };
    let marks = set.norm_string.chars().filter(|c| matches!(c, '?' | '~' | '%')).count();
    let precision = if marks == 1 { Precision::Leftward } else { Precision::SingleSegment };

    set.absorb(hit.start, hit.pos(1));
    qualify(set, hit.start, Qualifier::new(kind, precision, ""));
    Ok(())
}

fn mark_before(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let Some(kind) = mark_type(set, hit.start) else {
        return Ok(());
    };
    set.absorb(hit.pos(1), hit.start);
    qualify(set, hit.start, Qualifier::new(kind, Precision::SingleSegment, ""));
    Ok(())
}
