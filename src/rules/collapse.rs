//! Whitespace, dots, fillers and other connective tokens are folded into
//! neighbouring segments so later passes see only meaningful types.

use super::helpers::{absorb_backward, absorb_either, absorb_forward, is_number_at, is_word, kind_is};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Kind, SegmentSet};

static RULES: &[Rule] = &[
    rule! { name: "leading_space", when: find_leading_space, act: into_next },
    rule! { name: "weekday_comma", contains: [DayOfWeek, Comma], act: second_into_first },
    rule! { name: "space", when: find_space, act: into_previous },
    rule! { name: "filler", when: find_filler, act: filler_into_neighbour },
    rule! { name: "word_dot", when: find_word_dot, act: second_into_first },
    rule! { name: "dot_between_numbers", contains: [num, SingleDot, num], act: dot_to_hyphen },
    rule! { name: "number_dot", when: find_number_dot, act: second_into_first },
    rule! { name: "apostrophe_year", contains: [Apostrophe, Number1or2], act: into_next },
    rule! { name: "apostrophe_plural", contains: [Apostrophe, LetterS], act: into_next },
    rule! { name: "partial_to_partial", contains: [Partial, Hyphen, Partial], act: hyphen_to_range },
    rule! { name: "range_word_hyphen", contains: [RangeIndicator, Hyphen], act: second_into_first },
    rule! { name: "hyphen_range_word", contains: [Hyphen, RangeIndicator], act: into_next },
    rule! { name: "partial_hyphen", contains: [Partial, Hyphen], act: second_into_first },
    rule! { name: "switch_hyphen", contains: [RangeSwitch, Hyphen], act: second_into_first },
    rule! { name: "switch_to", contains: [RangeSwitch, RangeIndicator], act: second_into_first },
    rule! { name: "parenthesis", when: find_parenthesis, act: parenthesis_into_neighbour },
    rule! { name: "ordinal_century_letter", contains: [num, OrdinalIndicator, LetterC], act: letter_to_century },
    rule! { name: "between_and", when: find_between, act: between_to_range },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("collapse", set, RULES, env)
}

fn find_leading_space(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (set.len() > 1 && set.kind_at(0) == Some(Kind::Space)).then(|| Hit::at(0))
}

fn find_space(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (1..set.len()).find(|p| set.kind_at(*p) == Some(Kind::Space)).map(Hit::at)
}

fn find_filler(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    if set.len() < 2 {
        return None;
    }
    (0..set.len()).find(|p| kind_is(set, *p, &[Kind::Filler, Kind::DayOfWeek])).map(Hit::at)
}

fn find_word_dot(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len().saturating_sub(1))
        .find(|p| set.kind_at(*p).map(is_word).unwrap_or(false) && set.kind_at(p + 1) == Some(Kind::SingleDot))
        .map(|start| Hit { start, len: 2 })
}

fn find_number_dot(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (0..set.len().saturating_sub(1))
        .find(|p| is_number_at(set, *p) && set.kind_at(p + 1) == Some(Kind::SingleDot) && !is_number_at(set, p + 2))
        .map(|start| Hit { start, len: 2 })
}

fn find_parenthesis(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    if set.len() < 2 {
        return None;
    }
    (0..set.len()).find(|p| kind_is(set, *p, &[Kind::ParenOpen, Kind::ParenClose])).map(Hit::at)
}

/// `between X and Y`: the span from `between` to the first `and` after it.
fn find_between(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let start = set.position_of(Kind::Between)?;
    let and = (start + 2..set.len()).find(|p| set.kind_at(*p) == Some(Kind::And))?;
    Some(Hit { start, len: and - start + 1 })
}

fn into_next(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    absorb_forward(set, hit.start);
    Ok(())
}

fn into_previous(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    absorb_backward(set, hit.start);
    Ok(())
}

/// Fold the second matched segment into the first.
fn second_into_first(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.absorb(hit.start, hit.pos(1));
    Ok(())
}

fn filler_into_neighbour(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    absorb_either(set, hit.start, true);
    Ok(())
}

fn dot_to_hyphen(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.pos(1), Kind::Hyphen);
    Ok(())
}

fn hyphen_to_range(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.pos(1), Kind::RangeIndicator);
    Ok(())
}

fn parenthesis_into_neighbour(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let forward = set.kind_at(hit.start) == Some(Kind::ParenOpen);
    absorb_either(set, hit.start, forward);
    Ok(())
}

fn letter_to_century(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.pos(2), Kind::CenturyWord);
    Ok(())
}

fn between_to_range(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.end() - 1, Kind::RangeIndicator);
    absorb_forward(set, hit.start);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::rules::testing::run_passes;

    fn collapsed(input: &str) -> SegmentSet {
        run_passes(input, &[run], &Options::default()).unwrap()
    }

    #[test]
    fn whitespace_joins_the_previous_segment() {
        let set = collapsed("March 5 1985");
        assert_eq!(set.type_string(), "month_alpha number1or2 number4");
        assert_eq!(set.at(0).lexeme, "March ");
    }

    #[test]
    fn dots_fold_into_words_or_become_hyphens() {
        assert_eq!(collapsed("c. 1985").type_string(), "letter_c number4");
        assert_eq!(collapsed("ca.1985").type_string(), "approximate number4");
        assert_eq!(collapsed("12.03.1985").type_string(), "number1or2 hyphen number1or2 hyphen number4");
        assert_eq!(collapsed("5. March 1985").type_string(), "number1or2 month_alpha number4");
    }

    #[test]
    fn fillers_and_weekdays_disappear() {
        let set = collapsed("Tuesday, the 5th of March 1985");
        assert_eq!(set.type_string(), "number1or2 ordinal_indicator month_alpha number4");
        assert_eq!(set.full_lexeme(), "Tuesday, the 5th of March 1985");
    }

    #[test]
    fn apostrophes_attach_forward() {
        let set = collapsed("'85");
        assert_eq!(set.type_string(), "number1or2");
        assert!(set.has_subsource_at(0, Kind::Apostrophe));
        assert_eq!(collapsed("1990's").type_string(), "number4 letter_s");
    }

    #[test]
    fn partial_and_switch_markers_swallow_hyphens() {
        assert_eq!(collapsed("mid-1980s").type_string(), "partial number4 letter_s");
        assert_eq!(collapsed("early-to-mid 1980s").type_string(), "partial range_indicator partial number4 letter_s");
        assert_eq!(collapsed("early-late 1980s").type_string(), "partial range_indicator partial number4 letter_s");
        assert_eq!(collapsed("prior to 1950").type_string(), "range_switch number4");
    }

    #[test]
    fn between_and_becomes_a_range() {
        let set = collapsed("between 1985 and 1990");
        assert_eq!(set.type_string(), "number4 range_indicator number4");
        assert_eq!(set.at(0).lexeme, "between 1985 ");
    }

    #[test]
    fn ordinal_c_reads_as_century() {
        assert_eq!(collapsed("19th c.").type_string(), "number1or2 ordinal_indicator century");
    }

    #[test]
    fn parentheses_are_dropped() {
        assert_eq!(collapsed("(1985)").type_string(), "number4");
    }
}
