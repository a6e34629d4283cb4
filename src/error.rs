//! Typed errors for the loader and tokenizer (spec section 7).
//!
//! Runtime search errors are not represented here: per spec section 7, a search that
//! can't find anything simply returns an empty result, it never surfaces an error type.

use thiserror::Error;

/// Errors that can occur while parsing an OL transducer's fixed preamble
/// (spec section 4.1).
#[derive(Debug, Error)]
pub enum HeaderParseError {
    #[error("transducer header ended unexpectedly after {0} bytes")]
    UnexpectedEof(usize),
    #[error("HFST3 wrapper is missing its NUL terminator")]
    MissingWrapperTerminator,
    #[error("HFST3 wrapper type is not HFST_OL or HFST_OLW: {0:?}")]
    WrongWrapperType(String),
}

/// Errors that can occur while parsing an OL transducer's symbol table
/// (spec section 4.2).
#[derive(Debug, Error)]
pub enum AlphabetParseError {
    #[error("alphabet symbol table ended unexpectedly while reading symbol {0}")]
    UnexpectedEof(usize),
    #[error("alphabet symbol {0} is not NUL-terminated")]
    MissingTerminator(usize),
}

/// Errors reading the fixed-size index or transition table records (spec section 6.1).
#[derive(Debug, Error)]
pub enum TableReadError {
    #[error("index table ended unexpectedly: expected {expected} records, found room for {found}")]
    IndexTableTruncated { expected: u32, found: u32 },
    #[error("transition table ended unexpectedly: expected {expected} records, found room for {found}")]
    TransitionTableTruncated { expected: u32, found: u32 },
}

/// Top level error returned by [`crate::transducer::load_transducer`].
#[derive(Debug, Error)]
pub enum TransducerLoadError {
    #[error(transparent)]
    Header(#[from] HeaderParseError),
    #[error(transparent)]
    Alphabet(#[from] AlphabetParseError),
    #[error(transparent)]
    Table(#[from] TableReadError),
    #[error("transducer is not weighted; this package only supports weighted transducers")]
    Unweighted,
    #[error("failed to memory-map transducer file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "zhfst")]
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to open archive file: {0}")]
    OpenFile(#[source] std::io::Error),
    #[error("failed to read archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("archive did not contain an acceptor transducer")]
    MissingAcceptor,
    #[error("failed to parse speller metadata: {0}")]
    Metadata(#[from] serde_xml_rs::Error),
    #[error("failed to extract compressed archive member: {0}")]
    Extract(#[source] std::io::Error),
    #[error(transparent)]
    Transducer(#[from] TransducerLoadError),
}
