//! Segment model.
//!
//! A [`SegmentSet`] is the working sequence every pass rewrites. Each
//! [`Segment`] has a [`Kind`] tag; lexed leaves carry their text and position,
//! derived segments carry the indices of the segments they replaced.
//!
//! ```text
//!  "c. 1985?"
//!
//!  lex:        letter_c  single_dot  space  number4  question
//!                   \________/________/        |        |
//!  collapse:      letter_c ("c. ")          number4  question
//!                     \_________________________/________/
//!  certainty:              number4 ("c. 1985?")   + whole approximate_and_uncertain
//! ```

#[path = "model/kind.rs"]
mod kind;
#[path = "model/qualifier.rs"]
mod qualifier;
#[path = "model/segment.rs"]
mod segment;
#[path = "model/segment_set.rs"]
mod segment_set;

pub use kind::Kind;
pub use qualifier::{Certainty, Precision, Qualifier, QualifierType, SetType, push_certainty, push_unique};
pub use segment::{Literal, Location, SegId, Segment, Sym, derive_literal};
pub use segment_set::{Derive, SegmentSet};
