//! Type-sequence rule matching.
//!
//! A pass is a table of [`Rule`]s. Each rule pairs a [`Shape`] (where in the
//! current type sequence it applies) with an action that rewrites the
//! sequence at the hit.
//!
//! ```text
//!   kinds: [number4, hyphen, number1or2]
//!              │
//!   for rule in table (in order):
//!       shape.find(set) ── None ──▶ next rule
//!              │
//!            Some(hit) ──▶ action(set, hit) ──▶ restart from the first rule
//!
//!   no rule matches ──▶ fixpoint, pass done
//! ```
//!
//! Table order is precedence: a specific pattern must sit above a general one
//! that would also match.
//!
//! Termination: every action must change the sequence. An action that leaves
//! the item list untouched halts the pass (no-progress guard). A cap scaled
//! to the sequence length backs that up; a pass that reaches it fails instead
//! of handing a half-rewritten sequence to the next pass.

use super::Env;
use crate::error::Failure;
use crate::model::{Kind, SegmentSet};

/// Rule applications allowed per segment and rule, plus [`CAP_SLACK`].
const CAP_PER_SEGMENT: usize = 4;
const CAP_SLACK: usize = 64;

/// Iteration cap for one pass over `len` segments with `rules` rules.
fn iteration_cap(len: usize, rules: usize) -> usize {
    (len + 1) * rules.max(1) * CAP_PER_SEGMENT + CAP_SLACK
}

/// One element of a type-sequence pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pat {
    Is(Kind),
    AnyNumber,
    AnyDate,
    /// `?`, `~` or `%`.
    Marker,
    /// A number, a date part, or an alphabetic month or season.
    NumberOrPart,
    /// A 4-digit number or a tagged year.
    YearLike,
}

impl Pat {
    pub fn matches(self, kind: Kind) -> bool {
        match self {
            Pat::Is(k) => k == kind,
            Pat::AnyNumber => kind.is_number(),
            Pat::AnyDate => kind.is_date_type(),
            Pat::Marker => kind.is_qualifier_mark(),
            Pat::NumberOrPart => {
                kind.is_number() || kind.is_date_part() || matches!(kind, Kind::MonthAlpha | Kind::SeasonAlpha)
            }
            Pat::YearLike => matches!(kind, Kind::Number4 | Kind::Year),
        }
    }
}

/// Position and length of a match in the current sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub start: usize,
    pub len: usize,
}

impl Hit {
    pub fn at(start: usize) -> Self {
        Hit { start, len: 1 }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Absolute position of the `offset`-th matched element.
    pub fn pos(&self, offset: usize) -> usize {
        self.start + offset
    }
}

pub type Finder = fn(&SegmentSet, &Env) -> Option<Hit>;
pub type Action = fn(&mut SegmentSet, &Hit, &Env) -> Result<(), Failure>;

/// Where a rule applies.
#[derive(Clone, Copy)]
pub enum Shape {
    /// The whole sequence.
    Exact(&'static [Pat]),
    Prefix(&'static [Pat]),
    Suffix(&'static [Pat]),
    /// First occurrence anywhere.
    Contains(&'static [Pat]),
    /// Literal- or context-aware matching.
    Custom(Finder),
}

impl Shape {
    pub fn find(&self, set: &SegmentSet, env: &Env) -> Option<Hit> {
        let kinds = set.kinds();
        match self {
            Shape::Exact(pats) => (kinds.len() == pats.len() && window_matches(&kinds, 0, pats))
                .then_some(Hit { start: 0, len: pats.len() }),
            Shape::Prefix(pats) => window_matches(&kinds, 0, pats).then_some(Hit { start: 0, len: pats.len() }),
            Shape::Suffix(pats) => {
                let start = kinds.len().checked_sub(pats.len())?;
                window_matches(&kinds, start, pats).then_some(Hit { start, len: pats.len() })
            }
            Shape::Contains(pats) => find_window(&kinds, pats, 0),
            Shape::Custom(finder) => finder(set, env),
        }
    }
}

fn window_matches(kinds: &[Kind], start: usize, pats: &[Pat]) -> bool {
    if pats.is_empty() || start + pats.len() > kinds.len() {
        return false;
    }
    pats.iter().zip(&kinds[start..]).all(|(p, k)| p.matches(*k))
}

/// First window at or after `from` matching `pats`.
pub fn find_window(kinds: &[Kind], pats: &[Pat], from: usize) -> Option<Hit> {
    (from..kinds.len()).find(|start| window_matches(kinds, *start, pats)).map(|start| Hit { start, len: pats.len() })
}

/// A named pattern/action pair in a pass table.
pub struct Rule {
    pub name: &'static str,
    pub shape: Shape,
    pub action: Action,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).field("action", &"<function>").finish()
    }
}

/// Apply `rules` to `set` until none matches.
///
/// Each iteration evaluates the table top to bottom and applies the first
/// hit only. A failure from an action aborts the pass.
pub fn rewrite(pass: &str, set: &mut SegmentSet, rules: &[Rule], env: &Env) -> Result<(), Failure> {
    let debug = std::env::var_os("DATEMEND_DEBUG_PASSES").is_some();
    let cap = iteration_cap(set.len(), rules.len());

    for _ in 0..cap {
        let Some((rule, hit)) = rules.iter().find_map(|r| r.shape.find(set, env).map(|hit| (r, hit))) else {
            return Ok(());
        };

        let before = set.ids().to_vec();
        if debug {
            eprintln!("[rule] pass={} name=\"{}\" at={}..{} types=\"{}\"", pass, rule.name, hit.start, hit.end(), set.type_string());
        }

        (rule.action)(set, &hit, env)?;

        if set.ids() == before.as_slice() {
            if debug {
                eprintln!("[rule:no_progress] pass={} name=\"{}\"", pass, rule.name);
            }
            return Ok(());
        }
    }

    if debug {
        eprintln!("[rule:iteration_cap] pass={} cap={}", pass, cap);
    }
    Err(Failure::Unprocessable(format!("{} did not settle on {}", pass, set.type_string())))
}
