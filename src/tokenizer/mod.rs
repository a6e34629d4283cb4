//! Word-level tokenization helpers layered over the symbol-level C3 tokenizer
//! (spec section 4.3 covers the latter; this module is the supplementary word-boundary
//! and case-handling layer described in `SPEC_FULL.md` section C.4).

pub mod case_handling;

use unic_segment::Words;

pub trait Tokenize {
    fn words(&self) -> Words;
}

impl Tokenize for str {
    fn words(&self) -> Words {
        Words::new(self, |s| s.chars().any(|ch| ch.is_alphanumeric()))
    }
}
