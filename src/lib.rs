//! Free-text date normalization.
//!
//! `datemend` turns human-written date expressions (`circa 1985?`,
//! `early-to-mid 1980s`, `[March 5-10, 1985]`, `n.d.`) into structured date
//! values with earliest/latest bounds, qualifiers and warnings.
//!
//! ```
//! use datemend::{Datetype, parse};
//!
//! let out = parse("1985-1990");
//! assert!(out.failure.is_none());
//! assert_eq!(out.dates[0].earliest_at_granularity().as_deref(), Some("1985"));
//! ```

extern crate self as datemend;

#[macro_use]
mod macros;
mod api;
mod calendar;
pub mod date_types;
mod engine;
mod error;
mod lexer;
pub mod model;
pub mod options;
mod rules;

pub use api::{
    Context, PassTrace, ProcessDetails, ProcessResult, ProcessResultVerbose, parse, parse_verbose,
    parse_verbose_with, parse_with,
};
pub use date_types::{DateType, Datetype, Granularity, Qualifiable};
pub use engine::PassOutcome;
pub use error::{Failure, OptionsError};
pub use options::Options;
