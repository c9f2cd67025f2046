//! Engine run metrics.
//!
//! A small set of structs used to observe and debug how a run went:
//!
//! - `PassMetrics`: one entry per pipeline pass, in order, including skipped
//!   passes so a trace always lists the whole pipeline up to the failure.
//! - `RunMetrics`: totals for the lex, pass and resolve phases.
//!
//! Collection is cheap (a clock read and one type string per pass), so the
//! normal `parse_with` path gathers them too and simply drops them.

use std::time::Duration;

/// What a pass did to the segment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The type sequence changed.
    Applied,
    /// The pass ran and matched nothing.
    Unchanged,
    /// The input lacked a bucket the pass requires.
    Skipped,
    /// The pass returned a failure; later passes did not run.
    Failed,
}

impl PassOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            PassOutcome::Applied => "applied",
            PassOutcome::Unchanged => "unchanged",
            PassOutcome::Skipped => "skipped",
            PassOutcome::Failed => "failed",
        }
    }
}

/// Timing and result of a single pass.
#[derive(Debug, Clone)]
pub struct PassMetrics {
    pub name: &'static str,
    pub outcome: PassOutcome,
    /// Elapsed time for the pass.
    pub duration: Duration,
    /// Type string after the pass.
    pub types: String,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    /// Time spent in pre-checks, normalization and lexing.
    pub lex: Duration,
    pub passes: Vec<PassMetrics>,
    /// Time spent turning the final segments into dates.
    pub resolve: Duration,
}

impl RunMetrics {
    /// Sum of pass durations.
    pub fn passes_total(&self) -> Duration {
        self.passes.iter().map(|p| p.duration).sum()
    }
}
