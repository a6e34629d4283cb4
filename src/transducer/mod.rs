//! The transducer layer: C1 (header), C2 (alphabet + flags), C4 (index/transition
//! tables and the OL traversal protocol), and the on-disk OL format loader (spec
//! section 6.1).

pub mod alphabet;
pub mod buffer;
pub mod encoder;
pub mod flag;
pub mod header;
pub mod hfst;
pub mod index_table;
pub mod symbol_transition;
pub mod transition_table;
pub mod tree_node;

use crate::transducer::alphabet::TransducerAlphabet;
use crate::transducer::encoder::Encoder;
use crate::transducer::symbol_transition::SymbolTransition;
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

pub use crate::transducer::hfst::HfstTransducer;

/// C4: the OL state-graph traversal protocol (spec section 4.4), abstracted so the
/// search core (C6) can drive any conforming transducer, real or a hand-built test
/// fixture.
///
/// None of these methods add the "+1" probing offset described in spec section 4.4 on
/// the caller's behalf; per spec section 4.6.3, that offset is part of each expansion
/// primitive's own description (`n.lexicon_state + 1`), so it lives in
/// [`crate::speller::worker`], not here. [`Transducer::next`] is the one exception: it
/// performs its own internal `+1` when probing the index table, exactly as spec section
/// 4.4 describes.
pub trait Transducer {
    fn alphabet(&self) -> &TransducerAlphabet;
    fn mut_alphabet(&mut self) -> &mut TransducerAlphabet;
    fn encoder(&self) -> &Encoder;

    fn is_final(&self, i: TransitionTableIndex) -> bool;
    fn final_weight(&self, i: TransitionTableIndex) -> Option<Weight>;

    fn has_transitions(&self, i: TransitionTableIndex, symbol: Option<SymbolNumber>) -> bool;
    fn has_epsilons_or_flags(&self, i: TransitionTableIndex) -> bool;

    fn take_epsilons(&self, i: TransitionTableIndex) -> Option<SymbolTransition>;
    fn take_epsilons_and_flags(&self, i: TransitionTableIndex) -> Option<SymbolTransition>;
    fn take_non_epsilons(&self, i: TransitionTableIndex, symbol: SymbolNumber) -> Option<SymbolTransition>;

    fn next(&self, i: TransitionTableIndex, symbol: SymbolNumber) -> Option<TransitionTableIndex>;

    fn transition_input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber>;
}

/// Loads an OL transducer from an in-memory buffer (spec section 6.3:
/// `load_transducer(bytes) -> Transducer`). Works equally for memory-mapped files and
/// plain `Vec<u8>`s, via [`buffer::SharedBuffer`].
pub fn load_transducer(buf: buffer::SharedBuffer) -> Result<HfstTransducer, crate::error::TransducerLoadError> {
    HfstTransducer::from_buffer(buf)
}
