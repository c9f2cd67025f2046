//! `5th`, `19th`: ordinal suffixes fold into their number.

use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::SegmentSet;

static RULES: &[Rule] = &[rule! { name: "ordinal", contains: [num, OrdinalIndicator], act: merge_suffix }];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("ordinals", set, RULES, env)
}

fn merge_suffix(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.absorb(hit.start, hit.pos(1));
    Ok(())
}
