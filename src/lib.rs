//! A weighted finite-state spell checker over optimized-lookup (OL) transducers.
//!
//! Two OL transducers — an error model ("mutator") and a lexicon acceptor — are
//! searched synchronously in the tropical semiring to check, correct, and analyse
//! words, following the on-disk format and traversal protocol of HFST's
//! optimized-lookup runtime.

pub mod constants;
pub mod error;
pub mod speller;
pub mod tokenizer;
pub mod transducer;
pub mod types;

#[cfg(feature = "zhfst")]
pub mod archive;

pub use crate::error::{AlphabetParseError, HeaderParseError, TableReadError, TransducerLoadError};
pub use crate::speller::suggestion::Suggestion;
pub use crate::speller::{Speller, SpellerConfig};
pub use crate::tokenizer::Tokenize;
pub use crate::transducer::{load_transducer, Transducer};

#[cfg(feature = "zhfst")]
pub use crate::archive::{SpellerMetadata, ZipSpellerArchive};

#[cfg(feature = "zhfst")]
pub use crate::error::ArchiveError;
