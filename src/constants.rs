//! Fixed constants of the optimized-lookup (OL) transducer format.
//!
//! See spec section 3 and 6.1 for the on-disk record sizes and the index/transition
//! address space split.

use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// `TransitionIndex` on-disk size: `sizeof(SymbolNumber) + sizeof(u32)`.
pub const INDEX_TABLE_SIZE: usize = std::mem::size_of::<SymbolNumber>() + std::mem::size_of::<u32>();

/// `Transition` on-disk size: `2*sizeof(SymbolNumber) + sizeof(u32) + sizeof(Weight)`.
pub const TRANS_TABLE_SIZE: usize =
    2 * std::mem::size_of::<SymbolNumber>() + std::mem::size_of::<u32>() + std::mem::size_of::<Weight>();

/// Values `>= TARGET_TABLE` address the transition table; smaller values address the
/// index table. This is `2^31`.
pub const TARGET_TABLE: TransitionTableIndex = 2_147_483_648;

/// Sentinel meaning "no symbol" (`0xFFFF`).
pub const NO_SYMBOL: SymbolNumber = std::u16::MAX;

/// Sentinel meaning "no table index" (`0xFFFFFFFF`).
pub const NO_TABLE_INDEX: TransitionTableIndex = std::u32::MAX;

/// A weight interpretation of [`NO_TABLE_INDEX`], used as "infinite cost" in a couple of
/// legacy corners of the format; kept for parity with the reference implementation.
pub const INFINITE_WEIGHT: Weight = NO_TABLE_INDEX as Weight;

/// Magic bytes of the optional HFST3 wrapper header (spec section 4.1).
pub const HFST3_HEADER_MAGIC: &[u8] = b"HFST\0";
