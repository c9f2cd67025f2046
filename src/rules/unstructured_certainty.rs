//! Qualifier words and marks left over after the structural passes.
//!
//! Each one collapses into a neighbour: words prefer the following segment,
//! marks the preceding one, and either falls back to the other side. The
//! qualifier's precision records where it sat.

use super::helpers::{absorb_backward, absorb_forward, mark_of, qualify};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Kind, Precision, Qualifier, QualifierType, SegmentSet};
use crate::options::CBeforeDate;

static RULES: &[Rule] = &[rule! { name: "loose_qualifier", when: find_loose, act: attach }];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("unstructured_certainty", set, RULES, env)
}

fn find_loose(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    set.kinds()
        .iter()
        .position(|k| k.is_qualifier_mark() || matches!(k, Kind::Approximate | Kind::Uncertain | Kind::LetterC))
        .map(Hit::at)
}

fn qualifier_type(set: &SegmentSet, pos: usize, env: &Env) -> Option<QualifierType> {
    let seg = set.at(pos);
    match seg.kind {
        Kind::Approximate => Some(QualifierType::Approximate),
        Kind::Uncertain => Some(QualifierType::Uncertain),
        Kind::LetterC => match env.options.c_before_date {
            CBeforeDate::Circa => Some(QualifierType::Approximate),
            CBeforeDate::Copyright => None,
        },
        _ => mark_of(&seg.lexeme).and_then(QualifierType::from_mark),
    }
}

fn attach(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let pos = hit.start;
    let last = set.len() - 1;
    let accepts = |p: usize| set.kind_at(p).map(Kind::accepts_qualifier).unwrap_or(false);
    let can_forward = pos < last && accepts(pos + 1);
    let can_backward = pos > 0 && accepts(pos - 1);
    let prefers_forward = !set.at(pos).kind.is_qualifier_mark();

    let forward = match (prefers_forward, can_forward, can_backward) {
        (true, true, _) | (false, true, false) => true,
        (false, _, true) | (true, false, true) => false,
        _ => {
            return Err(Failure::Unprocessable(format!("nothing to qualify with `{}`", set.at(pos).lexeme.trim())));
        }
    };

    let precision = match (pos, forward) {
        (0, _) => Precision::Beginning,
        (p, _) if p == last => Precision::End,
        (_, true) => Precision::Rightward,
        (_, false) => Precision::Leftward,
    };
    let kind = qualifier_type(set, pos, env);
    let lexeme = set.at(pos).lexeme.clone();

    let target = if forward {
        absorb_forward(set, pos);
        pos
    } else {
        absorb_backward(set, pos);
        pos - 1
    };
    if let Some(kind) = kind {
        qualify(set, target, Qualifier::new(kind, precision, &lexeme));
    }
    Ok(())
}
