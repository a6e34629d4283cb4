//! Hand-built OL transducer byte blobs for the integration scenarios in spec section 8.
//! Mirrors the on-disk layout of spec section 6.1: a fixed preamble, a NUL-terminated
//! symbol table, a flat index table, and a flat transition table, with the index/
//! transition address space split at `TARGET_TABLE`.
#![allow(dead_code)]

use std::sync::Arc;

use wfst_speller::transducer::buffer::Buffer;
use wfst_speller::transducer::hfst::HfstTransducer;
use wfst_speller::transducer::load_transducer;

const TARGET_TABLE: u32 = 2_147_483_648;
const NO_SYMBOL: u16 = u16::MAX;
const NO_TABLE_INDEX: u32 = u32::MAX;

#[derive(Clone, Copy)]
pub struct IndexRow {
    pub input_symbol: u16,
    pub target: u32,
}

impl IndexRow {
    /// This symbol slot has no outgoing transition (and, at slot 0, the state isn't final).
    pub fn none() -> IndexRow {
        IndexRow { input_symbol: NO_SYMBOL, target: NO_TABLE_INDEX }
    }

    /// Slot 0 of a final state: carries the final weight's raw bit pattern.
    pub fn final_marker(weight: f32) -> IndexRow {
        IndexRow { input_symbol: NO_SYMBOL, target: weight.to_bits() }
    }

    /// A symbol slot pointing at the first of one or more transition-table rows.
    pub fn edge(input_symbol: u16, first_transition_row: u32) -> IndexRow {
        IndexRow { input_symbol, target: TARGET_TABLE + first_transition_row }
    }
}

#[derive(Clone, Copy)]
pub struct TransitionRow {
    pub input_symbol: u16,
    pub output_symbol: u16,
    pub target_state: u32,
    pub weight: f32,
}

impl TransitionRow {
    pub fn new(input_symbol: u16, output_symbol: u16, target_state: u32, weight: f32) -> TransitionRow {
        TransitionRow { input_symbol, output_symbol, target_state, weight }
    }
}

/// Assembles a minimal weighted OL transducer from the pieces above and loads it through
/// the real `load_transducer` path, so fixtures exercise the same parsing code as any
/// real `.hfstol` file.
pub fn build_transducer(symbols: &[&str], index_rows: &[IndexRow], transition_rows: &[TransitionRow]) -> HfstTransducer {
    let symbol_count = symbols.len() as u16;
    let mut buf = Vec::new();

    buf.extend_from_slice(&symbol_count.to_le_bytes()); // input_symbol_count
    buf.extend_from_slice(&symbol_count.to_le_bytes()); // symbol_count
    buf.extend_from_slice(&(index_rows.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(transition_rows.len() as u32).to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes()); // state_count, informational only
    buf.extend_from_slice(&(transition_rows.len() as u32).to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes()); // weighted = true
    for _ in 0..8 {
        buf.extend_from_slice(&0u32.to_le_bytes());
    }

    for s in symbols {
        buf.extend_from_slice(s.as_bytes());
        buf.push(0);
    }

    for row in index_rows {
        buf.extend_from_slice(&row.input_symbol.to_le_bytes());
        buf.extend_from_slice(&row.target.to_le_bytes());
    }

    for row in transition_rows {
        buf.extend_from_slice(&row.input_symbol.to_le_bytes());
        buf.extend_from_slice(&row.output_symbol.to_le_bytes());
        buf.extend_from_slice(&row.target_state.to_le_bytes());
        buf.extend_from_slice(&row.weight.to_bits().to_le_bytes());
    }

    let shared: Arc<dyn Buffer> = Arc::new(buf);
    load_transducer(shared).expect("hand-built fixture transducer must parse")
}
