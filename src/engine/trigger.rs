//! Trigger scanning (input pre-classification).
//!
//! This module inspects the normalized input string once and produces coarse
//! signals that let the pipeline skip passes which cannot possibly apply.
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains digits" or
//!   "uses only EDTF characters". A pass declares the buckets it needs and is
//!   skipped when the input lacks any of them.
//!
//! ## Design notes
//!
//! - This is a *heuristic* scan. False positives are acceptable because each
//!   pass still has to match its own type-sequence patterns.
//! - Keep the scan cheap: one walk over the characters, no allocation beyond
//!   the mask itself.

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS   = 1 << 0;
        const HAS_ALPHA    = 1 << 1;
        const HAS_BRACKETS = 1 << 2;
        const HAS_MARKS    = 1 << 3;
        const EDTF_CHARSET = 1 << 4;
    }
}

/// Input characteristics detected from the normalized input.
#[derive(Debug, Clone, Copy)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    /// Scan `input` for coarse buckets.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let mut edtf = !input.is_empty();

        for c in input.chars() {
            if c.is_ascii_digit() {
                buckets |= BucketMask::HAS_DIGITS;
            } else if c.is_ascii_alphabetic() {
                buckets |= BucketMask::HAS_ALPHA;
            }
            if matches!(c, '[' | ']' | '{' | '}' | '<' | '>') {
                buckets |= BucketMask::HAS_BRACKETS;
            }
            if matches!(c, '?' | '~' | '%') {
                buckets |= BucketMask::HAS_MARKS;
            }
            if !is_edtf_char(c) {
                edtf = false;
            }
        }

        if edtf {
            buckets |= BucketMask::EDTF_CHARSET;
        }
        TriggerInfo { buckets }
    }

    /// Whether every bucket in `required` was detected.
    pub fn allows(&self, required: BucketMask) -> bool {
        self.buckets.contains(required)
    }
}

fn is_edtf_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 'X' | 'x' | 'u' | '-' | '/' | '.' | '?' | '~' | '%' | '[' | ']' | '{' | '}' | ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edtf_strings_are_recognised() {
        let info = TriggerInfo::scan("2004-06~-11");
        assert!(info.allows(BucketMask::EDTF_CHARSET | BucketMask::HAS_MARKS | BucketMask::HAS_DIGITS));
        assert!(!info.allows(BucketMask::HAS_ALPHA));
    }

    #[test]
    fn words_and_spaces_leave_the_edtf_charset() {
        let info = TriggerInfo::scan("circa 1985?");
        assert!(info.allows(BucketMask::HAS_ALPHA | BucketMask::HAS_MARKS));
        assert!(!info.allows(BucketMask::EDTF_CHARSET));
    }

    #[test]
    fn empty_mask_always_allows() {
        assert!(TriggerInfo::scan("").allows(BucketMask::empty()));
        assert!(TriggerInfo::scan("<1985>").allows(BucketMask::HAS_BRACKETS));
    }
}
