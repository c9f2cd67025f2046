//! Rewrite engine.
//!
//! The engine runs an input string through an ordered list of passes, each of
//! which rewrites a [`SegmentSet`](crate::model::SegmentSet) by matching
//! patterns over its *type sequence*.
//!
//! ## How the parts work together
//!
//! ```text
//! input ── prechecks (rules/prechecks.rs) ── known-unknown / unprocessable
//!   │
//!   ├─ normalize + lex                        (lexer.rs)
//!   ├─ TriggerInfo::scan                      (trigger.rs)
//!   │        │ buckets gate passes
//!   v        v
//! for pass in rules::PASSES                   (pipeline.rs)
//!     rewrite(set, pass rules)                (matcher.rs)
//!       - first matching rule wins
//!       - repeat to fixpoint
//!       - no-progress guard + iteration cap
//!     Err(failure) ──▶ stop
//!   │
//!   v
//! resolve                                     (resolve.rs)
//!   - collect date payloads
//!   - copy set-level qualifiers
//!   │
//!   v
//! RunOutput { dates, failure, metrics }       (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `trigger.rs`: scans the normalized input for coarse buckets.
//! - `matcher.rs`: `Pat`/`Shape`/`Rule` and the fixpoint `rewrite` loop.
//! - `pipeline.rs`: `Env`, `Pass`, and the run driver with per-pass metrics.
//! - `resolve.rs`: turns the final segment set into `DateType`s.
//! - `metrics.rs`: timing and outcome data for runs and passes.
//!
//! ## Adding a rule
//!
//! Add a `rule!` entry to the pass table under `src/rules/`. Place it above
//! any more general rule that would also match. If the pass needs a new
//! coarse trigger, add a `BucketMask` bit and teach `TriggerInfo::scan`.
//!
//! ## Debugging
//!
//! Set `DATEMEND_DEBUG_PASSES=1` to print the trigger scan, every rule
//! application, pass outcomes and resolved dates.

#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/trigger.rs"]
mod trigger;

#[allow(unused_imports)]
pub use matcher::{Action, Finder, Hit, Pat, Rule, Shape, find_window, rewrite};
#[allow(unused_imports)]
pub use metrics::{PassMetrics, PassOutcome, RunMetrics};
#[allow(unused_imports)]
pub use pipeline::{Env, Pass, PassFn, RunOutput, run, run_with};
#[allow(unused_imports)]
pub use trigger::{BucketMask, TriggerInfo};
