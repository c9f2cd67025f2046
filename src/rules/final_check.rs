//! Last gate before resolution: the sequence must be dates separated by
//! single date separators.

use crate::engine::Env;
use crate::error::Failure;
use crate::model::{Kind, SegmentSet};

pub(crate) fn run(set: &mut SegmentSet, _env: &Env) -> Result<(), Failure> {
    let kinds = set.kinds();
    let fail = || Failure::Unprocessable(set.type_string());

    if kinds.is_empty() || kinds.iter().any(|k| !k.is_date_type() && *k != Kind::DateSeparator) {
        return Err(fail());
    }
    let separator = |k: &Kind| *k == Kind::DateSeparator;
    let dangling = kinds.first().is_some_and(separator) || kinds.last().is_some_and(separator);
    let doubled = kinds.windows(2).any(|w| separator(&w[0]) && separator(&w[1]));
    if dangling || doubled {
        return Err(fail());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Context;
    use crate::date_types::{DateCommon, DateType, Year};
    use crate::model::{Derive, Literal, Location, Segment};
    use crate::options::Options;

    fn set_of(kinds: &[Kind]) -> SegmentSet {
        let mut set = SegmentSet::new("", "");
        for kind in kinds {
            set.push_leaf(Segment::leaf(Kind::Number4, "1985", Literal::Int(1985), Location { col: 0, len: 4 }));
            let pos = set.len() - 1;
            if kind.is_date_type() {
                let date = DateType::Year(Year::new(DateCommon::new("1985", Default::default()), 1985));
                set.replace(pos..pos + 1, *kind, Derive::date(date, Literal::Int(1985)));
            } else {
                set.retype(pos, *kind);
            }
        }
        set
    }

    fn check(kinds: &[Kind]) -> Result<(), Failure> {
        let context = Context::default();
        let options = Options::default();
        run(&mut set_of(kinds), &Env::new(&context, &options))
    }

    #[test]
    fn dates_and_separators_pass() {
        assert!(check(&[Kind::YearDate]).is_ok());
        assert!(check(&[Kind::YearDate, Kind::DateSeparator, Kind::RangeDate]).is_ok());
    }

    #[test]
    fn leftovers_and_stray_separators_fail() {
        assert_eq!(
            check(&[Kind::YearDate, Kind::Hyphen]),
            Err(Failure::Unprocessable("year_date_type hyphen".to_string()))
        );
        assert!(check(&[Kind::DateSeparator, Kind::YearDate]).is_err());
        assert!(check(&[Kind::YearDate, Kind::DateSeparator]).is_err());
        assert!(check(&[Kind::YearDate, Kind::DateSeparator, Kind::DateSeparator, Kind::YearDate]).is_err());
        assert!(check(&[]).is_err());
    }
}
