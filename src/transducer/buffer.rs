//! The shared, immutable byte buffer a transducer's tables are read out of.
//!
//! Spec section 9 calls for memory-safety over the original's raw pointer-arithmetic
//! casts; this is the seam that lets [`super::index_table::IndexTable`] and
//! [`super::transition_table::TransitionTable`] be backed by either a real memory-mapped
//! file (the common case for on-disk `.hfstol` blobs) or a plain `Vec<u8>` (the common
//! case for blobs already extracted from a ZHFST archive member, or for test fixtures),
//! without duplicating the table-reading code per backing store.
use std::sync::Arc;

/// Anything that can hand back a stable byte slice and be shared across threads.
/// `memmap::Mmap` and `Vec<u8>` both satisfy this directly.
pub trait Buffer: AsRef<[u8]> + Send + Sync {}
impl<T: AsRef<[u8]> + Send + Sync> Buffer for T {}

/// A reference-counted, immutable transducer buffer (spec section 5: "Transducer blobs
/// ... are immutable after load and may be shared by multiple concurrent spellers").
pub type SharedBuffer = Arc<dyn Buffer>;
