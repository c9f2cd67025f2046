//! Alphabetic month and season names become date parts.

use crate::engine::{Env, Hit, Rule, rewrite};
use crate::error::Failure;
use crate::model::{Kind, SegmentSet};

static RULES: &[Rule] = &[
    rule! { name: "month_name", contains: [MonthAlpha], act: to_month },
    rule! { name: "season_name", contains: [SeasonAlpha], act: to_season },
];

pub(crate) fn run(set: &mut SegmentSet, env: &Env) -> Result<(), Failure> {
    rewrite("months", set, RULES, env)
}

fn to_month(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.start, Kind::Month);
    Ok(())
}

fn to_season(set: &mut SegmentSet, hit: &Hit, _env: &Env) -> Result<(), Failure> {
    set.retype(hit.start, Kind::Season);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;
    use crate::options::Options;
    use crate::rules::collapse;
    use crate::rules::testing::run_passes;

    #[test]
    fn names_keep_their_numeric_value() {
        let set = run_passes("Sept. 1985", &[collapse::run, run], &Options::default()).unwrap();
        assert_eq!(set.type_string(), "month number4");
        assert_eq!(set.at(0).literal, Literal::Int(9));
        assert_eq!(set.at(0).lexeme, "Sept. ");

        let set = run_passes("Autumn 1985", &[collapse::run, run], &Options::default()).unwrap();
        assert_eq!(set.type_string(), "season number4");
        assert_eq!(set.at(0).literal, Literal::Int(23));
    }
}
