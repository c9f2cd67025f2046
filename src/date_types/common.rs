use crate::model::{Certainty, Kind, Precision, Qualifier, SegId, SegmentSet, Sym, push_certainty, push_unique};
use crate::options::{BeforeDateTreatment, Options};
use chrono::NaiveDate;

/// Option values that affect bounds, captured when a date is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub open_start: NaiveDate,
    pub open_end: NaiveDate,
    pub before: BeforeDateTreatment,
}

impl Bounds {
    pub fn from_options(options: &Options) -> Self {
        Self {
            open_start: options.open_unknown_start_date,
            open_end: options.open_unknown_end_date,
            before: options.before_date_treatment,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

/// Snapshot of one tagged date part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub kind: Kind,
    pub lexeme: String,
    pub value: Option<i64>,
}

/// A directional qualifier recorded against one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartQualifier {
    pub part: Kind,
    pub qualifier: Qualifier,
}

impl PartQualifier {
    /// Whether this qualifier reaches a part at `depth`.
    pub fn covers(&self, depth: u8) -> bool {
        let Some(own) = self.part.depth() else {
            return false;
        };
        covers(self.qualifier.precision, own, depth)
    }
}

fn covers(precision: Precision, own: u8, other: u8) -> bool {
    match precision {
        Precision::Leftward => other <= own,
        Precision::Rightward => other >= own,
        Precision::SingleSegment => other == own,
        Precision::Whole | Precision::Beginning | Precision::End => true,
    }
}

/// State shared by every date type.
#[derive(Debug, Clone, PartialEq)]
pub struct DateCommon {
    pub lexeme: String,
    pub parts: Vec<Part>,
    pub partial: Option<Sym>,
    pub switch: Option<Sym>,
    pub qualifiers: Vec<Qualifier>,
    pub part_qualifiers: Vec<PartQualifier>,
    pub certainty: Vec<Certainty>,
    pub bounds: Bounds,
}

impl DateCommon {
    pub fn new(lexeme: &str, bounds: Bounds) -> Self {
        Self {
            lexeme: lexeme.to_string(),
            parts: Vec::new(),
            partial: None,
            switch: None,
            qualifiers: Vec::new(),
            part_qualifiers: Vec::new(),
            certainty: Vec::new(),
            bounds,
        }
    }

    pub fn with_partial(mut self, partial: Option<Sym>) -> Self {
        self.partial = partial;
        self
    }

    pub fn with_switch(mut self, switch: Option<Sym>) -> Self {
        self.switch = switch;
        self
    }

    /// Build the common state from the segments a date is assembled from.
    ///
    /// Partial indicators and range switches among `ids` set `partial` and
    /// `switch`. Qualifiers and leftward certainty tags found on date parts are
    /// redistributed by [`DateCommon::place_qualifier`]; anything attached to
    /// other sources applies to the whole value.
    pub fn assemble(set: &SegmentSet, ids: &[SegId], bounds: Bounds) -> Self {
        let mut common = DateCommon::new(&set.leaves_lexeme(ids), bounds);
        let mut pending: Vec<(usize, Qualifier)> = Vec::new();

        for id in ids {
            let seg = set.seg(*id);
            if seg.kind.is_date_part() {
                let index = common.parts.len();
                common.parts.push(Part { kind: seg.kind, lexeme: seg.lexeme.clone(), value: seg.int() });
                for q in &seg.qualifiers {
                    pending.push((index, q.clone()));
                }
                for c in &seg.certainty {
                    match c.as_leftward_qualifier() {
                        Some(q) => pending.push((index, q)),
                        None => push_certainty(&mut common.certainty, *c),
                    }
                }
                continue;
            }

            match (seg.kind, seg.literal.sym()) {
                (Kind::Partial, Some(sym)) => common.partial = Some(sym),
                (Kind::RangeSwitch, Some(sym)) => common.switch = Some(sym),
                _ => {}
            }
            for q in &seg.qualifiers {
                push_unique(&mut common.qualifiers, q.clone());
            }
            for c in &seg.certainty {
                match c.as_leftward_qualifier() {
                    Some(q) => push_unique(&mut common.qualifiers, q.with_precision(Precision::Whole)),
                    None => push_certainty(&mut common.certainty, *c),
                }
            }
        }

        for (index, q) in pending {
            common.place_qualifier(index, q);
        }
        common
    }

    /// Route a qualifier found on part `index` to whole-value or part scope.
    ///
    /// Promotes to whole when the precision is already wholesale, when a
    /// rightward qualifier sits on the last part or a leftward one on the
    /// first, or when its depth coverage spans every part.
    pub fn place_qualifier(&mut self, index: usize, q: Qualifier) {
        let count = self.parts.len();
        let Some(part) = self.parts.get(index) else {
            push_unique(&mut self.qualifiers, q);
            return;
        };
        let part_kind = part.kind;

        let promote = q.precision.is_wholesale()
            || count == 1
            || (q.precision == Precision::Rightward && index + 1 == count)
            || (q.precision == Precision::Leftward && index == 0)
            || match part_kind.depth() {
                Some(own) => self
                    .parts
                    .iter()
                    .filter_map(|p| p.kind.depth())
                    .all(|other| covers(q.precision, own, other)),
                None => true,
            };

        if promote {
            let q = if q.precision.is_wholesale() { q } else { q.with_precision(Precision::Whole) };
            push_unique(&mut self.qualifiers, q);
        } else if !self.part_qualifiers.iter().any(|pq| pq.part == part_kind && pq.qualifier == q) {
            self.part_qualifiers.push(PartQualifier { part: part_kind, qualifier: q });
        }
    }

    /// Copy a set-level qualifier onto this date.
    pub fn add_whole_qualifier(&mut self, q: Qualifier) {
        push_unique(&mut self.qualifiers, q);
    }

    pub fn add_certainty(&mut self, c: Certainty) {
        push_certainty(&mut self.certainty, c);
    }

    pub fn part_value(&self, kind: Kind) -> Option<i64> {
        self.parts.iter().find(|p| p.kind == kind).and_then(|p| p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QualifierType;

    fn ymd_common() -> DateCommon {
        let mut common = DateCommon::new("2004-06-11", Bounds::default());
        for (kind, lexeme) in [(Kind::Year, "2004"), (Kind::Month, "-06"), (Kind::Day, "-11")] {
            common.parts.push(Part { kind, lexeme: lexeme.to_string(), value: None });
        }
        common
    }

    fn approx(precision: Precision) -> Qualifier {
        Qualifier::new(QualifierType::Approximate, precision, "~")
    }

    #[test]
    fn leftward_on_middle_part_stays_part_level() {
        let mut common = ymd_common();
        common.place_qualifier(1, approx(Precision::Leftward));
        assert!(common.qualifiers.is_empty());
        assert_eq!(common.part_qualifiers.len(), 1);
        let pq = &common.part_qualifiers[0];
        assert!(pq.covers(0));
        assert!(pq.covers(1));
        assert!(!pq.covers(2));
    }

    #[test]
    fn leftward_on_last_part_covers_everything() {
        let mut common = ymd_common();
        common.place_qualifier(2, approx(Precision::Leftward));
        assert_eq!(common.qualifiers.len(), 1);
        assert_eq!(common.qualifiers[0].precision, Precision::Whole);
    }

    #[test]
    fn rightward_on_last_part_promotes() {
        let mut common = ymd_common();
        common.place_qualifier(2, approx(Precision::Rightward));
        assert_eq!(common.qualifiers.len(), 1);
        assert!(common.part_qualifiers.is_empty());
    }

    #[test]
    fn leftward_on_first_part_promotes() {
        let mut common = ymd_common();
        common.place_qualifier(0, approx(Precision::Leftward));
        assert_eq!(common.qualifiers.len(), 1);
    }

    #[test]
    fn single_segment_on_month_is_recorded_at_month() {
        let mut common = ymd_common();
        common.place_qualifier(1, approx(Precision::SingleSegment));
        assert_eq!(common.part_qualifiers[0].part, Kind::Month);
        assert!(!common.part_qualifiers[0].covers(0));
    }

    #[test]
    fn beginning_is_wholesale() {
        let mut common = ymd_common();
        common.place_qualifier(1, approx(Precision::Beginning));
        assert_eq!(common.qualifiers[0].precision, Precision::Beginning);
    }
}
