use super::qualifier::{push_certainty, push_unique};
use super::segment::derive_literal;
use super::{Certainty, Kind, Literal, Location, Qualifier, SegId, Segment, SetType};
use crate::date_types::DateType;
use std::ops::Range;

/// Explicit overrides for [`SegmentSet::derive`].
#[derive(Debug, Default)]
pub struct Derive {
    pub lexeme: Option<String>,
    pub literal: Option<Literal>,
    pub date: Option<DateType>,
}

impl Derive {
    pub fn literal(literal: Literal) -> Self {
        Self { literal: Some(literal), ..Self::default() }
    }

    pub fn date(date: DateType, literal: Literal) -> Self {
        Self { literal: Some(literal), date: Some(date), ..Self::default() }
    }
}

/// The ordered working sequence plus set-level metadata.
///
/// Segments live in an append-only arena; `items` is the current sequence of
/// arena indices. Derived segments point at their sources by index, so the
/// whole provenance tree stays readable after any number of rewrites.
#[derive(Debug, Clone)]
pub struct SegmentSet {
    arena: Vec<Segment>,
    items: Vec<SegId>,
    pub orig_string: String,
    pub norm_string: String,
    pub qualifiers: Vec<Qualifier>,
    pub certainty: Vec<Certainty>,
    pub set_type: Option<SetType>,
    warnings: Vec<String>,
    pub inferred_date: bool,
}

impl SegmentSet {
    pub fn new(orig_string: &str, norm_string: &str) -> Self {
        Self {
            arena: Vec::new(),
            items: Vec::new(),
            orig_string: orig_string.to_string(),
            norm_string: norm_string.to_string(),
            qualifiers: Vec::new(),
            certainty: Vec::new(),
            set_type: None,
            warnings: Vec::new(),
            inferred_date: false,
        }
    }

    pub fn push_leaf(&mut self, segment: Segment) -> SegId {
        let id = self.arena.len();
        self.arena.push(segment);
        self.items.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> &[SegId] {
        &self.items
    }

    pub fn id_at(&self, pos: usize) -> SegId {
        self.items[pos]
    }

    pub fn at(&self, pos: usize) -> &Segment {
        &self.arena[self.items[pos]]
    }

    /// Mutable access for appending annotations.
    pub fn at_mut(&mut self, pos: usize) -> &mut Segment {
        let id = self.items[pos];
        &mut self.arena[id]
    }

    pub fn seg(&self, id: SegId) -> &Segment {
        &self.arena[id]
    }

    pub fn kind_at(&self, pos: usize) -> Option<Kind> {
        self.items.get(pos).map(|id| self.arena[*id].kind)
    }

    pub fn kinds(&self) -> Vec<Kind> {
        self.items.iter().map(|id| self.arena[*id].kind).collect()
    }

    /// Space-separated type tags, e.g. `"number4 hyphen number1or2"`.
    pub fn type_string(&self) -> String {
        self.kinds().iter().map(|k| k.as_str()).collect::<Vec<_>>().join(" ")
    }

    pub fn position_of(&self, kind: Kind) -> Option<usize> {
        self.items.iter().position(|id| self.arena[*id].kind == kind)
    }

    /// Concatenation of the current items' lexemes.
    pub fn lexeme(&self) -> String {
        self.items.iter().map(|id| self.arena[*id].lexeme.as_str()).collect()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn add_qualifier(&mut self, qualifier: Qualifier) {
        push_unique(&mut self.qualifiers, qualifier);
    }

    pub fn add_certainty(&mut self, certainty: Certainty) {
        push_certainty(&mut self.certainty, certainty);
    }

    // --- derivation ------------------------------------------------------------

    /// Create a segment derived from `sources` without placing it in the sequence.
    pub fn derive(&mut self, sources: &[SegId], kind: Kind, overrides: Derive) -> SegId {
        let segs: Vec<&Segment> = sources.iter().map(|id| &self.arena[*id]).collect();

        let lexeme = match overrides.lexeme {
            Some(l) => l,
            None => segs.iter().map(|s| s.lexeme.as_str()).collect(),
        };
        let literal = match overrides.literal {
            Some(l) => l,
            None if segs.len() == 1 => segs[0].literal,
            None => derive_literal(&segs.iter().map(|s| s.literal).collect::<Vec<_>>()),
        };
        let date = match overrides.date {
            Some(d) => Some(Box::new(d)),
            None if segs.len() == 1 => segs[0].date.clone(),
            None => None,
        };

        let mut certainty = Vec::new();
        let mut qualifiers = Vec::new();
        for s in &segs {
            for c in &s.certainty {
                push_certainty(&mut certainty, *c);
            }
            for q in &s.qualifiers {
                push_unique(&mut qualifiers, q.clone());
            }
        }

        let location = self.span(sources);
        let segment = Segment { kind, lexeme, literal, location, certainty, qualifiers, sources: sources.to_vec(), date };
        let id = self.arena.len();
        self.arena.push(segment);
        id
    }

    /// Collapse `range` of the sequence into one derived segment.
    pub fn replace(&mut self, range: Range<usize>, kind: Kind, overrides: Derive) -> SegId {
        let sources: Vec<SegId> = self.items[range.clone()].to_vec();
        let id = self.derive(&sources, kind, overrides);
        self.items.splice(range, [id]);
        id
    }

    /// Collapse every segment in `range` into the one at `target`, keeping the
    /// target's kind, literal and date payload.
    pub fn absorb_range(&mut self, target: usize, range: Range<usize>) -> SegId {
        debug_assert!(range.contains(&target));
        let t = self.at(target);
        let kind = t.kind;
        let overrides = Derive {
            lexeme: None,
            literal: Some(t.literal),
            date: t.date.as_deref().cloned(),
        };
        self.replace(range, kind, overrides)
    }

    /// Collapse the adjacent segment at `marker` into the one at `target`.
    pub fn absorb(&mut self, target: usize, marker: usize) -> SegId {
        let range = target.min(marker)..target.max(marker) + 1;
        self.absorb_range(target, range)
    }

    /// Replace the segment at `pos` with a derived copy of a different kind.
    pub fn retype(&mut self, pos: usize, kind: Kind) -> SegId {
        self.replace(pos..pos + 1, kind, Derive::default())
    }

    pub fn retype_with(&mut self, pos: usize, kind: Kind, literal: Literal) -> SegId {
        self.replace(pos..pos + 1, kind, Derive::literal(literal))
    }

    pub fn remove(&mut self, pos: usize) -> SegId {
        self.items.remove(pos)
    }

    /// Insert a derived copy of the segment at `pos` at index `at`.
    pub fn duplicate(&mut self, pos: usize, at: usize) -> SegId {
        let source = self.items[pos];
        let kind = self.arena[source].kind;
        let id = self.derive(&[source], kind, Derive::default());
        self.items.insert(at, id);
        id
    }

    pub fn move_item(&mut self, from: usize, to: usize) {
        let id = self.items.remove(from);
        self.items.insert(to, id);
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    // --- provenance ------------------------------------------------------------

    /// Lexed leaves under `id`, in derivation order.
    pub fn subsources(&self, id: SegId) -> Vec<SegId> {
        let seg = &self.arena[id];
        if seg.is_leaf() {
            return vec![id];
        }
        seg.sources.iter().flat_map(|s| self.subsources(*s)).collect()
    }

    /// Whether any ancestor of `id` has type `kind`.
    pub fn has_subsource(&self, id: SegId, kind: Kind) -> bool {
        self.arena[id].sources.iter().any(|s| self.arena[*s].kind == kind || self.has_subsource(*s, kind))
    }

    pub fn has_subsource_at(&self, pos: usize, kind: Kind) -> bool {
        self.has_subsource(self.items[pos], kind)
    }

    /// Text covered by the leaves of `ids`, in input order, each leaf once.
    pub fn leaves_lexeme(&self, ids: &[SegId]) -> String {
        let mut leaves: Vec<SegId> = ids.iter().flat_map(|id| self.subsources(*id)).collect();
        leaves.sort_by_key(|id| self.arena[*id].location.map(|l| l.col).unwrap_or(usize::MAX));
        leaves.dedup();
        leaves.iter().map(|id| self.arena[*id].lexeme.as_str()).collect()
    }

    /// [`leaves_lexeme`](Self::leaves_lexeme) over the whole current sequence.
    pub fn full_lexeme(&self) -> String {
        self.leaves_lexeme(&self.items)
    }

    fn span(&self, sources: &[SegId]) -> Option<Location> {
        let mut start: Option<usize> = None;
        let mut end: Option<usize> = None;
        for id in sources {
            for leaf in self.subsources(*id) {
                if let Some(loc) = self.arena[leaf].location {
                    start = Some(start.map_or(loc.col, |s| s.min(loc.col)));
                    end = Some(end.map_or(loc.col + loc.len, |e| e.max(loc.col + loc.len)));
                }
            }
        }
        match (start, end) {
            (Some(s), Some(e)) => Some(Location { col: s, len: e - s }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Precision, QualifierType};

    fn leaf(set: &mut SegmentSet, kind: Kind, lexeme: &str, literal: Literal) {
        let col = set.norm_string.len();
        set.norm_string.push_str(lexeme);
        set.push_leaf(Segment::leaf(kind, lexeme, literal, Location { col, len: lexeme.len() }));
    }

    fn sample() -> SegmentSet {
        let mut set = SegmentSet::new("19-85 ?", "");
        leaf(&mut set, Kind::Number1or2, "19", Literal::Int(19));
        leaf(&mut set, Kind::Hyphen, "-", Literal::Nil);
        leaf(&mut set, Kind::Number1or2, "85", Literal::Int(85));
        leaf(&mut set, Kind::Space, " ", Literal::Nil);
        leaf(&mut set, Kind::Question, "?", Literal::Nil);
        set
    }

    #[test]
    fn replace_concatenates_lexeme_and_literal() {
        let mut set = sample();
        set.remove(1);
        let id = set.replace(0..2, Kind::Number4, Derive::default());
        assert_eq!(set.seg(id).lexeme, "1985");
        assert_eq!(set.seg(id).literal, Literal::Int(1985));
        assert_eq!(set.type_string(), "number4 space question");
    }

    #[test]
    fn absorb_keeps_target_kind_and_literal() {
        let mut set = sample();
        set.absorb(2, 3);
        assert_eq!(set.kinds(), vec![Kind::Number1or2, Kind::Hyphen, Kind::Number1or2, Kind::Question]);
        assert_eq!(set.at(2).lexeme, "85 ");
        assert_eq!(set.at(2).literal, Literal::Int(85));
        assert!(set.has_subsource_at(2, Kind::Space));
        assert!(!set.has_subsource_at(0, Kind::Space));
    }

    #[test]
    fn provenance_survives_nested_rewrites() {
        let mut set = sample();
        set.absorb(2, 3);
        set.retype(2, Kind::Year);
        set.absorb(2, 3);
        let id = set.id_at(2);
        assert!(set.has_subsource(id, Kind::Number1or2));
        assert!(set.has_subsource(id, Kind::Question));
        assert_eq!(set.subsources(id).len(), 3);
        assert_eq!(set.at(2).location, Some(Location { col: 3, len: 4 }));
    }

    #[test]
    fn qualifiers_are_inherited_on_derive() {
        let mut set = sample();
        set.at_mut(0).qualifiers.push(Qualifier::new(QualifierType::Inferred, Precision::SingleSegment, "["));
        set.absorb(0, 1);
        assert_eq!(set.at(0).qualifiers.len(), 1);
    }

    #[test]
    fn duplicates_share_leaves_for_lexeme_reconstruction() {
        let mut set = sample();
        set.duplicate(2, 0);
        assert_eq!(set.lexeme(), "8519-85 ?");
        assert_eq!(set.full_lexeme(), "19-85 ?");
    }

    #[test]
    fn warnings_are_deduplicated_in_order() {
        let mut set = sample();
        set.warn("b");
        set.warn("a");
        set.warn("b");
        assert_eq!(set.warnings(), &["b".to_string(), "a".to_string()]);
    }
}
