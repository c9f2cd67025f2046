use crate::date_types::DateType;
use crate::engine::{self, Env, PassOutcome, RunOutput};
use crate::error::Failure;
use crate::model::{Certainty, Qualifier, SetType};
use crate::options::Options;
use chrono::{Local, NaiveDate};
use std::time::Duration;

/// Processing context.
///
/// Holds the environment needed to read expressions relative to "now": the
/// last year a bare 4-digit number may name, and the pivot for two-digit
/// years.
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference date standing in for today.
    pub reference_date: NaiveDate,
}

impl Context {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { reference_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default() }
        } else {
            Self { reference_date: Local::now().date_naive() }
        }
    }
}

/// Result from [`parse`] and [`parse_with`].
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// The processed input text.
    pub text: String,
    /// Resolved dates, or a single `DateType::Error` when processing failed.
    pub dates: Vec<DateType>,
    /// Soft warnings in the order they were raised.
    pub warnings: Vec<String>,
    pub set_type: Option<SetType>,
    /// Qualifiers that apply to the whole expression.
    pub qualifiers: Vec<Qualifier>,
    pub certainty: Vec<Certainty>,
    /// Whether the whole expression was wrapped in square brackets.
    pub inferred_date: bool,
    pub failure: Option<Failure>,
    /// Total elapsed time spent processing.
    pub elapsed: Duration,
}

impl ProcessResult {
    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

/// One pass of a verbose run.
#[derive(Debug, Clone)]
pub struct PassTrace {
    pub name: &'static str,
    pub outcome: PassOutcome,
    pub duration: Duration,
    /// Type string after the pass.
    pub types: String,
}

/// Additional details returned by [`parse_verbose`] and [`parse_verbose_with`].
///
/// Compact by intent: enough to see which passes fired and where a failure
/// happened, without dumping the segment arena.
#[derive(Debug, Clone)]
pub struct ProcessDetails {
    pub total: Duration,
    /// Time spent in pre-checks, normalization and lexing.
    pub lex: Duration,
    pub passes_total: Duration,
    pub passes: Vec<PassTrace>,
    pub resolve: Duration,
    /// Input buckets found by the trigger scan.
    pub buckets: Vec<&'static str>,
    /// Type string of the final segment sequence.
    pub final_types: String,
}

/// Result from [`parse_verbose`] and [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ProcessResultVerbose {
    pub result: ProcessResult,
    pub details: ProcessDetails,
}

/// Process `text` with default [`Options`] and a default [`Context`].
///
/// # Example
/// ```
/// use datemend::{Datetype, parse};
///
/// let out = parse("March 5, 1985");
/// assert_eq!(out.dates[0].earliest_at_granularity().as_deref(), Some("1985-03-05"));
/// ```
pub fn parse(text: &str) -> ProcessResult {
    parse_with(text, &Context::default(), &Options::default())
}

/// Process `text` with the provided `context`/`options`.
///
/// Supply a fixed reference date for deterministic results.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> ProcessResult {
    let out = engine::run(text, &Env::new(context, options));
    to_result(text, out)
}

pub fn parse_verbose(text: &str) -> ProcessResultVerbose {
    parse_verbose_with(text, &Context::default(), &Options::default())
}

/// Process `text` and return the per-pass trace alongside the result.
pub fn parse_verbose_with(text: &str, context: &Context, options: &Options) -> ProcessResultVerbose {
    let out = engine::run(text, &Env::new(context, options));

    let passes = out
        .metrics
        .passes
        .iter()
        .map(|p| PassTrace { name: p.name, outcome: p.outcome, duration: p.duration, types: p.types.clone() })
        .collect();
    let details = ProcessDetails {
        total: out.metrics.total,
        lex: out.metrics.lex,
        passes_total: out.metrics.passes_total(),
        passes,
        resolve: out.metrics.resolve,
        buckets: out.buckets.iter_names().map(|(name, _)| name).collect(),
        final_types: out.set.type_string(),
    };

    ProcessResultVerbose { result: to_result(text, out), details }
}

fn to_result(text: &str, out: RunOutput) -> ProcessResult {
    let RunOutput { set, dates, failure, metrics, .. } = out;
    ProcessResult {
        text: text.to_string(),
        dates,
        warnings: set.warnings().to_vec(),
        set_type: set.set_type,
        qualifiers: set.qualifiers,
        certainty: set.certainty,
        inferred_date: set.inferred_date,
        failure,
        elapsed: metrics.total,
    }
}
