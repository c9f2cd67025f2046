//! Square, curly and angle brackets.
//!
//! A bracket pair around the whole string qualifies every resulting date (or,
//! for EDTF sets, marks the result as a set). Pairs inside the string qualify
//! the segments they enclose. The brackets themselves are absorbed into their
//! neighbours either way.

use super::helpers::{absorb_backward, absorb_either, absorb_forward, qualify};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Certainty, Kind, Precision, Qualifier, QualifierType, SegmentSet, SetType};
use crate::options::{MismatchedBracketHandling, SquareBracketInterpretation};

static RULES: &[Rule] = &[
    rule! { name: "whole_wrapped", when: find_wrapped, act: unwrap_whole },
    rule! { name: "pair", when: find_pair, act: unwrap_pair },
    rule! { name: "stray", when: find_stray, act: stray_bracket },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("brackets", set, RULES, env)
}

fn is_bracket(kind: Kind) -> bool {
    kind.is_open_bracket() || kind.is_close_bracket()
}

fn find_wrapped(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let len = set.len();
    if len < 3 {
        return None;
    }
    let kinds = set.kinds();
    let closer = kinds[0].closer()?;
    let inner_clean = !kinds[1..len - 1].iter().any(|k| is_bracket(*k));
    (kinds[len - 1] == closer && inner_clean).then_some(Hit { start: 0, len })
}

/// The first close bracket with a same-family opener before it.
fn find_pair(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let kinds = set.kinds();
    for (close, kind) in kinds.iter().enumerate() {
        let Some(opener) = kind.opener() else {
            continue;
        };
        if let Some(open) = kinds[..close].iter().rposition(|k| *k == opener) {
            return Some(Hit { start: open, len: close - open + 1 });
        }
    }
    None
}

fn find_stray(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    set.kinds().iter().position(|k| is_bracket(*k)).map(Hit::at)
}

fn unwrap_whole(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let open = set.kind_at(hit.start);
    match (open, env.options.square_bracket_interpretation) {
        (Some(Kind::SquareOpen), SquareBracketInterpretation::InferredDate) => {
            set.add_qualifier(Qualifier::new(QualifierType::Inferred, Precision::Whole, ""));
            set.add_certainty(Certainty::Inferred);
            set.inferred_date = true;
        }
        (Some(Kind::SquareOpen), SquareBracketInterpretation::EdtfSet) => {
            set.set_type = Some(SetType::Alternate);
            set.add_certainty(Certainty::OneOfSet);
        }
        (Some(Kind::CurlyOpen), _) => {
            set.set_type = Some(SetType::Inclusive);
            set.add_certainty(Certainty::AllOfSet);
        }
        (Some(Kind::AngleOpen), _) => {
            set.add_qualifier(Qualifier::new(QualifierType::Temporary, Precision::Whole, ""));
        }
        _ => {}
    }

    absorb_backward(set, hit.end() - 1);
    absorb_forward(set, hit.start);
    Ok(())
}

fn unwrap_pair(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    if hit.len < 3 {
        return Err(Failure::Unprocessable(format!("empty brackets in {}", set.orig_string.trim())));
    }

    let qualifier = match (set.kind_at(hit.start), env.options.square_bracket_interpretation) {
        (Some(Kind::SquareOpen), SquareBracketInterpretation::InferredDate) => Some(QualifierType::Inferred),
        (Some(Kind::AngleOpen), _) => Some(QualifierType::Temporary),
        _ => None,
    };
    if let Some(kind) = qualifier {
        for pos in hit.start + 1..hit.end() - 1 {
            qualify(set, pos, Qualifier::new(kind, Precision::SingleSegment, ""));
        }
    }

    absorb_backward(set, hit.end() - 1);
    absorb_forward(set, hit.start);
    Ok(())
}

fn stray_bracket(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    if env.options.mismatched_bracket_handling == MismatchedBracketHandling::Failure {
        return Err(Failure::MismatchedBrackets);
    }
    let forward = set.kind_at(hit.start).map(Kind::is_open_bracket).unwrap_or(false);
    let lexeme = set.at(hit.start).lexeme.trim().to_string();
    if absorb_either(set, hit.start, forward).is_none() {
        return Err(Failure::MismatchedBrackets);
    }
    set.warn(format!("Mismatched bracket `{lexeme}` absorbed"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::rules::collapse;
    use crate::rules::testing::run_passes;

    fn bracketed(input: &str, options: &Options) -> Result<SegmentSet, Failure> {
        run_passes(input, &[collapse::run, run], options)
    }

    #[test]
    fn whole_square_brackets_mark_the_result_inferred() {
        let set = bracketed("[1997]", &Options::default()).unwrap();
        assert_eq!(set.type_string(), "number4");
        assert!(set.inferred_date);
        assert_eq!(set.qualifiers[0].kind, QualifierType::Inferred);
        assert_eq!(set.qualifiers[0].precision, Precision::Whole);
        assert!(set.certainty.contains(&Certainty::Inferred));
    }

    #[test]
    fn edtf_set_brackets_set_the_set_type() {
        let mut options = Options::default();
        options.set("square_bracket_interpretation", "edtf_set").unwrap();
        let set = bracketed("[1667, 1668]", &options).unwrap();
        assert_eq!(set.set_type, Some(SetType::Alternate));
        assert!(!set.inferred_date);

        let set = bracketed("{1667, 1668}", &Options::default()).unwrap();
        assert_eq!(set.set_type, Some(SetType::Inclusive));
        assert!(set.certainty.contains(&Certainty::AllOfSet));
    }

    #[test]
    fn inner_pairs_qualify_enclosed_segments() {
        let set = bracketed("[1997]-[1998]", &Options::default()).unwrap();
        assert_eq!(set.type_string(), "number4 hyphen number4");
        for pos in [0, 2] {
            let q = &set.at(pos).qualifiers;
            assert_eq!(q.len(), 1);
            assert_eq!(q[0].kind, QualifierType::Inferred);
            assert_eq!(q[0].precision, Precision::SingleSegment);
        }
        assert!(set.at(1).qualifiers.is_empty());
        assert!(set.qualifiers.is_empty());
    }

    #[test]
    fn angle_brackets_are_temporary() {
        let set = bracketed("<1985>", &Options::default()).unwrap();
        assert_eq!(set.qualifiers[0].kind, QualifierType::Temporary);
    }

    #[test]
    fn stray_brackets_follow_the_handling_option() {
        let set = bracketed("[1985", &Options::default()).unwrap();
        assert_eq!(set.type_string(), "number4");
        assert_eq!(set.warnings().len(), 1);

        let mut options = Options::default();
        options.set("mismatched_bracket_handling", "failure").unwrap();
        assert_eq!(bracketed("1985]", &options).unwrap_err(), Failure::MismatchedBrackets);
    }

    #[test]
    fn empty_pairs_are_unprocessable() {
        let err = bracketed("1985 [] 1990", &Options::default()).unwrap_err();
        assert!(matches!(err, Failure::Unprocessable(_)));
    }
}
