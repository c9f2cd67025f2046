//! The pass pipeline.
//!
//! ```text
//! text ── prechecks ── Some(outcome) ─────────────────────────────┐
//!            │                                                  │
//!           None                                                │
//!            v                                                  │
//!   normalize ─▶ lex ─▶ TriggerInfo::scan                        │
//!                          │                                    │
//!            for pass in passes:                                │
//!              buckets missing? ── skip                         │
//!              (pass.run)(set, env) ── Err ──▶ stop              │
//!                          │                                    │
//!                          v                                    v
//!                       resolve ──────────────────────────▶ RunOutput
//! ```

use super::metrics::{PassMetrics, PassOutcome, RunMetrics};
use super::resolve::{error_date, resolve};
use super::trigger::{BucketMask, TriggerInfo};
use crate::api::Context;
use crate::date_types::{Bounds, DateType};
use crate::error::Failure;
use crate::lexer;
use crate::model::SegmentSet;
use crate::options::Options;
use crate::rules;
use chrono::Datelike;
use std::time::Instant;

/// Read-only per-run environment handed to every pass and rule.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    pub context: &'a Context,
    pub options: &'a Options,
}

impl<'a> Env<'a> {
    pub fn new(context: &'a Context, options: &'a Options) -> Self {
        Self { context, options }
    }

    pub fn reference_year(&self) -> i64 {
        i64::from(self.context.reference_date.year())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_options(self.options)
    }
}

pub type PassFn = fn(&mut SegmentSet, &Env) -> Result<(), Failure>;

/// One named pipeline stage.
pub struct Pass {
    pub name: &'static str,
    /// Buckets the input must have for the pass to run.
    pub buckets: BucketMask,
    pub run: PassFn,
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass").field("name", &self.name).field("buckets", &self.buckets).finish()
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub set: SegmentSet,
    pub dates: Vec<DateType>,
    pub failure: Option<Failure>,
    pub buckets: BucketMask,
    pub metrics: RunMetrics,
}

/// Process `text` through the full pipeline.
pub fn run(text: &str, env: &Env) -> RunOutput {
    run_with(text, rules::PASSES, env)
}

/// Process `text` through `passes` only.
pub fn run_with(text: &str, passes: &[Pass], env: &Env) -> RunOutput {
    let debug = std::env::var_os("DATEMEND_DEBUG_PASSES").is_some();
    let start = Instant::now();
    let mut metrics = RunMetrics::default();

    if let Some(outcome) = rules::prechecks::check(text, env) {
        let set = SegmentSet::new(text, text);
        let (dates, failure) = match outcome {
            Ok(date) => (vec![date], None),
            Err(failure) => (vec![error_date(&set, &failure, env)], Some(failure)),
        };
        if debug {
            eprintln!("[precheck] text=\"{}\" failure={:?}", text, failure.as_ref().map(Failure::tag));
        }
        metrics.lex = start.elapsed();
        metrics.total = start.elapsed();
        return RunOutput { set, dates, failure, buckets: BucketMask::empty(), metrics };
    }

    let norm = lexer::normalize(text);
    let info = TriggerInfo::scan(&norm);
    if debug {
        eprintln!("[trigger_scan] buckets={:?}", info.buckets);
    }

    let mut set = match lexer::lex(text, &norm) {
        Ok(set) => set,
        Err(failure) => {
            let set = SegmentSet::new(text, &norm);
            let dates = vec![error_date(&set, &failure, env)];
            metrics.lex = start.elapsed();
            metrics.total = start.elapsed();
            return RunOutput { set, dates, failure: Some(failure), buckets: info.buckets, metrics };
        }
    };
    metrics.lex = start.elapsed();

    let mut failure = None;
    for pass in passes {
        let pass_start = Instant::now();
        let before = set.type_string();

        let outcome = if !info.allows(pass.buckets) {
            PassOutcome::Skipped
        } else {
            match (pass.run)(&mut set, env) {
                Ok(()) if set.type_string() != before => PassOutcome::Applied,
                Ok(()) => PassOutcome::Unchanged,
                Err(err) => {
                    failure = Some(err);
                    PassOutcome::Failed
                }
            }
        };

        if debug {
            eprintln!("[pass] name={} outcome={} types=\"{}\"", pass.name, outcome.as_str(), set.type_string());
        }
        metrics.passes.push(PassMetrics {
            name: pass.name,
            outcome,
            duration: pass_start.elapsed(),
            types: set.type_string(),
        });
        if failure.is_some() {
            break;
        }
    }

    let resolve_start = Instant::now();
    let dates = match &failure {
        Some(err) => vec![error_date(&set, err, env)],
        None => resolve(&set),
    };
    metrics.resolve = resolve_start.elapsed();
    metrics.total = start.elapsed();

    RunOutput { set, dates, failure, buckets: info.buckets, metrics }
}
