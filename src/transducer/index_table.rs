//! Half of C4: the index table (spec section 3, "TransitionIndex").

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{INDEX_TABLE_SIZE, NO_SYMBOL, NO_TABLE_INDEX};
use crate::transducer::buffer::SharedBuffer;
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// A flat array of fixed-size `{input_symbol, first_transition_index}` records, backed
/// by the transducer's shared buffer.
#[derive(Clone)]
pub struct IndexTable {
    buf: SharedBuffer,
    start: usize,
    count: u32,
}

impl std::fmt::Debug for IndexTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "IndexTable {{ count: {} }}", self.count)
    }
}

impl IndexTable {
    pub fn new(buf: SharedBuffer, start: usize, _end: usize, count: u32) -> IndexTable {
        IndexTable { buf, start, count }
    }

    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn bytes(&self) -> &[u8] {
        (*self.buf).as_ref()
    }

    fn record_offset(&self, i: TransitionTableIndex) -> Option<usize> {
        if i >= self.count {
            return None;
        }
        Some(self.start + i as usize * INDEX_TABLE_SIZE)
    }

    /// Raw `input_symbol` field, or `None` if `i` is out of range.
    pub fn input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        let off = self.record_offset(i)?;
        let sym = LittleEndian::read_u16(&self.bytes()[off..]);
        if sym == NO_SYMBOL {
            None
        } else {
            Some(sym)
        }
    }

    /// Raw `first_transition_index` field interpreted as a transition-table-space
    /// target, or `None` if out of range or unset.
    pub fn target(&self, i: TransitionTableIndex) -> Option<TransitionTableIndex> {
        let off = self.record_offset(i)?;
        let target = LittleEndian::read_u32(&self.bytes()[off + 2..]);
        if target == NO_TABLE_INDEX {
            None
        } else {
            Some(target)
        }
    }

    /// `true` when `input_symbol == NO_SYMBOL && first_transition_index != NO_TABLE_INDEX`
    /// (spec section 3).
    pub fn is_final(&self, i: TransitionTableIndex) -> bool {
        let off = match self.record_offset(i) {
            Some(o) => o,
            None => return false,
        };
        let bytes = self.bytes();
        let sym = LittleEndian::read_u16(&bytes[off..]);
        let raw_target = LittleEndian::read_u32(&bytes[off + 2..]);
        sym == NO_SYMBOL && raw_target != NO_TABLE_INDEX
    }

    /// The `first_transition_index` field reinterpreted bit-for-bit as an `f32`.
    pub fn final_weight(&self, i: TransitionTableIndex) -> Option<Weight> {
        if !self.is_final(i) {
            return None;
        }
        let off = self.record_offset(i)?;
        let raw = LittleEndian::read_u32(&self.bytes()[off + 2..]);
        Some(f32::from_bits(raw))
    }
}
