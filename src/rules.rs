//! Pass tables.
//!
//! Each submodule is one pipeline stage: a `rule!` table plus a `run`
//! function that feeds it to [`rewrite`](crate::engine::rewrite). The order of
//! [`PASSES`] is the processing order.
//!
//! ```text
//! collapse ─ brackets ─ edtf_qualifiers ─ certainty ─ unstructured_certainty
//!     ─ months ─ ordinals ─ standardize ─ tagging ─ segmentation ─ ranges
//!     ─ final_check
//! ```

pub(crate) mod analyzers;
pub(crate) mod brackets;
pub(crate) mod certainty;
pub(crate) mod collapse;
pub(crate) mod edtf_qualifiers;
pub(crate) mod final_check;
pub(crate) mod helpers;
pub(crate) mod months;
pub(crate) mod ordinals;
pub(crate) mod prechecks;
pub(crate) mod ranges;
pub(crate) mod segmentation;
pub(crate) mod standardize;
pub(crate) mod tagging;
pub(crate) mod unstructured_certainty;


use crate::engine::{BucketMask, Pass};

pub(crate) static PASSES: &[Pass] = &[
    Pass { name: "collapse", buckets: BucketMask::empty(), run: collapse::run },
    Pass { name: "brackets", buckets: BucketMask::HAS_BRACKETS, run: brackets::run },
    Pass {
        name: "edtf_qualifiers",
        buckets: BucketMask::EDTF_CHARSET.union(BucketMask::HAS_MARKS),
        run: edtf_qualifiers::run,
    },
    Pass { name: "certainty", buckets: BucketMask::empty(), run: certainty::run },
    Pass { name: "unstructured_certainty", buckets: BucketMask::empty(), run: unstructured_certainty::run },
    Pass { name: "months", buckets: BucketMask::HAS_ALPHA, run: months::run },
    Pass { name: "ordinals", buckets: BucketMask::HAS_DIGITS.union(BucketMask::HAS_ALPHA), run: ordinals::run },
    Pass { name: "standardize", buckets: BucketMask::empty(), run: standardize::run },
    Pass { name: "tagging", buckets: BucketMask::HAS_DIGITS, run: tagging::run },
    Pass { name: "segmentation", buckets: BucketMask::empty(), run: segmentation::run },
    Pass { name: "ranges", buckets: BucketMask::empty(), run: ranges::run },
    Pass { name: "final_check", buckets: BucketMask::empty(), run: final_check::run },
];

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers shared by the per-pass unit tests.

    use crate::api::Context;
    use crate::engine::Env;
    use crate::error::Failure;
    use crate::lexer;
    use crate::model::SegmentSet;
    use crate::options::Options;

    pub fn lexed(input: &str) -> SegmentSet {
        let norm = lexer::normalize(input);
        lexer::lex(input, &norm).unwrap()
    }

    /// Lex `input` and run `passes` in order with `options`.
    pub fn run_passes(
        input: &str,
        passes: &[fn(&mut SegmentSet, &Env) -> Result<(), Failure>],
        options: &Options,
    ) -> Result<SegmentSet, Failure> {
        let context = Context::default();
        let env = Env::new(&context, options);
        let mut set = lexed(input);
        for pass in passes {
            pass(&mut set, &env)?;
        }
        Ok(set)
    }
}
