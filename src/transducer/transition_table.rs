//! Half of C4: the transition table (spec section 3, "Transition").

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{NO_SYMBOL, TRANS_TABLE_SIZE};
use crate::transducer::buffer::SharedBuffer;
use crate::transducer::symbol_transition::SymbolTransition;
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// A flat array of fixed-size `{input_symbol, output_symbol, target_index, weight}`
/// records, backed by the transducer's shared buffer.
#[derive(Clone)]
pub struct TransitionTable {
    buf: SharedBuffer,
    start: usize,
    count: u32,
}

impl std::fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "TransitionTable {{ count: {} }}", self.count)
    }
}

impl TransitionTable {
    pub fn new(buf: SharedBuffer, start: usize, _end: usize, count: u32) -> TransitionTable {
        TransitionTable { buf, start, count }
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
        Some(self.start + i as usize * TRANS_TABLE_SIZE)
    }

    pub fn input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        let off = self.record_offset(i)?;
        let sym = LittleEndian::read_u16(&self.bytes()[off..]);
        if sym == NO_SYMBOL {
            None
        } else {
            Some(sym)
        }
    }

    pub fn output_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        let off = self.record_offset(i)?;
        let sym = LittleEndian::read_u16(&self.bytes()[off + 2..]);
        if sym == NO_SYMBOL {
            None
        } else {
            Some(sym)
        }
    }

    pub fn target(&self, i: TransitionTableIndex) -> Option<TransitionTableIndex> {
        let off = self.record_offset(i)?;
        Some(LittleEndian::read_u32(&self.bytes()[off + 4..]))
    }

    pub fn weight(&self, i: TransitionTableIndex) -> Option<Weight> {
        let off = self.record_offset(i)?;
        let raw = LittleEndian::read_u32(&self.bytes()[off + 8..]);
        Some(f32::from_bits(raw))
    }

    /// `true` when `input == NO_SYMBOL && output == NO_SYMBOL` (the canonical rule from
    /// spec section 9; the `target == 1` convention is not relied upon).
    pub fn is_final(&self, i: TransitionTableIndex) -> bool {
        let off = match self.record_offset(i) {
            Some(o) => o,
            None => return false,
        };
        let bytes = self.bytes();
        let input = LittleEndian::read_u16(&bytes[off..]);
        let output = LittleEndian::read_u16(&bytes[off + 2..]);
        input == NO_SYMBOL && output == NO_SYMBOL
    }

    /// Packages `(target, output_symbol, weight)` for the transition at `i`. Callers
    /// should only call this once they've confirmed `input_symbol(i)` matches what
    /// they're looking for.
    pub fn symbol_transition(&self, i: TransitionTableIndex) -> SymbolTransition {
        let off = self.record_offset(i).expect("caller validated index in range");
        let bytes = self.bytes();
        let output = LittleEndian::read_u16(&bytes[off + 2..]);
        let target = LittleEndian::read_u32(&bytes[off + 4..]);
        let weight = f32::from_bits(LittleEndian::read_u32(&bytes[off + 8..]));
        SymbolTransition::new(target, output, weight)
    }
}
