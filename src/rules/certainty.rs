//! Structural certainty: qualifier words and marks at the edges of the string,
//! component marks in free text, and `and`/`or` sets.

use super::helpers::{absorb_backward, absorb_forward, mark_of};
use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Certainty, Kind, Precision, Qualifier, QualifierType, SegmentSet, SetType, push_certainty};
use crate::options::{AndOrDateHandling, CBeforeDate};

static RULES: &[Rule] = &[
    rule! { name: "leading_word_trailing_mark", when: find_word_and_mark, act: word_and_mark },
    rule! { name: "leading_approximate", when: find_leading_approximate, act: leading_approximate },
    rule! { name: "leading_uncertain", when: find_leading_uncertain, act: leading_uncertain },
    rule! { name: "trailing_mark", when: find_trailing_mark, act: trailing_mark },
    rule! { name: "component_mark", contains: [numpart, mark], act: component_mark },
    rule! { name: "and_or", when: find_conjunction, act: conjunction },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("certainty", set, RULES, env)
}

/// A leading approximation word, counting `c` only when it reads as circa.
fn leading_approximation(set: &SegmentSet, env: &Env) -> bool {
    match set.kind_at(0) {
        Some(Kind::Approximate) => true,
        Some(Kind::LetterC) => env.options.c_before_date == CBeforeDate::Circa,
        _ => false,
    }
}

fn second_accepts(set: &SegmentSet) -> bool {
    set.kind_at(1).map(Kind::accepts_qualifier).unwrap_or(false)
}

fn find_word_and_mark(set: &SegmentSet, env: &Env) -> Option<Hit> {
    let len = set.len();
    let last_is_mark = set.kind_at(len.checked_sub(1)?).map(Kind::is_qualifier_mark).unwrap_or(false);
    (len >= 3 && leading_approximation(set, env) && last_is_mark && second_accepts(set)).then_some(Hit { start: 0, len })
}

fn find_leading_approximate(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let leading = matches!(set.kind_at(0), Some(Kind::Approximate | Kind::LetterC));
    (leading && second_accepts(set)).then(|| Hit::at(0))
}

fn find_leading_uncertain(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (set.kind_at(0) == Some(Kind::Uncertain) && second_accepts(set)).then(|| Hit::at(0))
}

fn find_trailing_mark(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    let last = set.len().checked_sub(1)?;
    let is_mark = set.kind_at(last).map(Kind::is_qualifier_mark).unwrap_or(false);
    let prev_accepts = last > 0 && set.kind_at(last - 1).map(Kind::accepts_qualifier).unwrap_or(false);
    (is_mark && prev_accepts).then(|| Hit::at(last))
}

fn find_conjunction(set: &SegmentSet, _env: &Env) -> Option<Hit> {
    (1..set.len().saturating_sub(1)).find(|p| matches!(set.kind_at(*p), Some(Kind::And | Kind::Or))).map(Hit::at)
}

fn word_and_mark(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let last = hit.end() - 1;
    let mark = mark_of(&set.at(last).lexeme);
    let kind = match mark {
        Some('~') => QualifierType::Approximate,
        _ => QualifierType::ApproximateAndUncertain,
    };
    let lexeme = set.at(0).lexeme.clone();
    set.add_qualifier(Qualifier::new(kind, Precision::Whole, &lexeme));

    absorb_backward(set, last);
    absorb_forward(set, 0);
    Ok(())
}

fn leading_approximate(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let copyright = set.kind_at(hit.start) == Some(Kind::LetterC) && env.options.c_before_date == CBeforeDate::Copyright;
    if !copyright {
        let lexeme = set.at(hit.start).lexeme.clone();
        set.add_qualifier(Qualifier::new(QualifierType::Approximate, Precision::Whole, &lexeme));
    }
    absorb_forward(set, hit.start);
    Ok(())
}

fn leading_uncertain(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let lexeme = set.at(hit.start).lexeme.clone();
    set.add_qualifier(Qualifier::new(QualifierType::Uncertain, Precision::Whole, &lexeme));
    absorb_forward(set, hit.start);
    Ok(())
}

fn trailing_mark(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    if let Some(kind) = mark_of(&set.at(hit.start).lexeme).and_then(QualifierType::from_mark) {
        set.add_qualifier(Qualifier::new(kind, Precision::Whole, ""));
    }
    absorb_backward(set, hit.start);
    Ok(())
}

fn component_mark(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    let tag = mark_of(&set.at(hit.pos(1)).lexeme).and_then(Certainty::leftward_from_mark);
    set.absorb(hit.start, hit.pos(1));
    if let Some(tag) = tag {
        push_certainty(&mut set.at_mut(hit.start).certainty, tag);
    }
    Ok(())
}

fn conjunction(set: &mut SegmentSet, hit: &Hit, env: &Env) -> Result<(), Failure> {
    let or = set.kind_at(hit.start) == Some(Kind::Or);
    set.retype(hit.start, Kind::DateSeparator);
    if env.options.and_or_date_handling == AndOrDateHandling::SingleRange {
        return Ok(());
    }
    if or {
        set.set_type = Some(SetType::Alternate);
        set.add_certainty(Certainty::OneOfSet);
    } else {
        set.set_type = Some(SetType::Inclusive);
        set.add_certainty(Certainty::AllOfSet);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::rules::collapse;
    use crate::rules::testing::run_passes;

    fn certain(input: &str, options: &Options) -> SegmentSet {
        run_passes(input, &[collapse::run, run], options).unwrap()
    }

    fn whole(set: &SegmentSet) -> Vec<QualifierType> {
        set.qualifiers.iter().map(|q| q.kind).collect()
    }

    #[test]
    fn leading_words_qualify_the_whole_value() {
        let set = certain("circa 1985", &Options::default());
        assert_eq!(set.type_string(), "number4");
        assert_eq!(whole(&set), vec![QualifierType::Approximate]);
        assert_eq!(set.qualifiers[0].lexeme, "circa");

        let set = certain("possibly March 1985", &Options::default());
        assert_eq!(set.type_string(), "month_alpha number4");
        assert_eq!(whole(&set), vec![QualifierType::Uncertain]);
    }

    #[test]
    fn word_plus_mark_is_approximate_and_uncertain() {
        let set = certain("circa 1985?", &Options::default());
        assert_eq!(set.type_string(), "number4");
        assert_eq!(whole(&set), vec![QualifierType::ApproximateAndUncertain]);

        let set = certain("ca. 1985~", &Options::default());
        assert_eq!(whole(&set), vec![QualifierType::Approximate]);
    }

    #[test]
    fn c_follows_the_c_before_date_option() {
        let set = certain("c. 1985", &Options::default());
        assert_eq!(whole(&set), vec![QualifierType::Approximate]);

        let mut options = Options::default();
        options.set("c_before_date", "copyright").unwrap();
        let set = certain("c 1985", &options);
        assert_eq!(set.type_string(), "number4");
        assert!(set.qualifiers.is_empty());
    }

    #[test]
    fn trailing_mark_by_type() {
        let set = certain("March 1985?", &Options::default());
        assert_eq!(set.type_string(), "month_alpha number4");
        assert_eq!(whole(&set), vec![QualifierType::Uncertain]);
    }

    #[test]
    fn interior_marks_tag_the_component() {
        let set = certain("1985? or 1990", &Options::default());
        assert_eq!(set.type_string(), "number4 date_separator number4");
        assert_eq!(set.at(0).certainty, vec![Certainty::LeftwardUncertain]);
    }

    #[test]
    fn conjunctions_become_sets() {
        let set = certain("1985 or 1990", &Options::default());
        assert_eq!(set.set_type, Some(SetType::Alternate));
        assert_eq!(set.certainty, vec![Certainty::OneOfSet]);

        let set = certain("1985 & 1990", &Options::default());
        assert_eq!(set.set_type, Some(SetType::Inclusive));

        let mut options = Options::default();
        options.set("and_or_date_handling", "single_range").unwrap();
        let set = certain("1985 or 1990", &options);
        assert_eq!(set.type_string(), "number4 date_separator number4");
        assert_eq!(set.set_type, None);
    }
}
