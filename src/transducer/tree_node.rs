//! A single frontier entry of the synchronous two-transducer search (spec section 4.6).
//!
//! Mirrors `hfst_ol::TreeNode` from the reference implementation: an immutable value
//! threaded through the search, each step producing an updated copy rather than
//! mutating in place.

use smol_str::SmolStr;

use crate::transducer::flag::FlagState;
use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// One node of the search frontier: the output produced so far, where each half of the
/// synchronized pair currently stands, the flag diacritic state, and the accumulated
/// weight.
#[derive(Debug, Clone)]
pub struct TreeNode {
    output: Vec<SymbolNumber>,
    input_pos: usize,
    mutator_state: TransitionTableIndex,
    lexicon_state: TransitionTableIndex,
    flags: FlagState,
    weight: Weight,
}

impl TreeNode {
    /// The root of the search: no output yet, both transducers at their start state,
    /// a zeroed flag state, zero weight.
    pub fn start(flag_state_size: usize) -> TreeNode {
        TreeNode {
            output: Vec::new(),
            input_pos: 0,
            mutator_state: 0,
            lexicon_state: 0,
            flags: vec![0; flag_state_size],
            weight: 0.0,
        }
    }

    pub fn output(&self) -> &[SymbolNumber] {
        &self.output
    }

    pub fn input_pos(&self) -> usize {
        self.input_pos
    }

    pub fn mutator_state(&self) -> TransitionTableIndex {
        self.mutator_state
    }

    pub fn lexicon_state(&self) -> TransitionTableIndex {
        self.lexicon_state
    }

    pub fn flags(&self) -> &FlagState {
        &self.flags
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Advances only the lexicon half, appending `output_symbol` to the output tape.
    pub fn update_lexicon(&self, output_symbol: SymbolNumber, next_lexicon: TransitionTableIndex, weight: Weight) -> TreeNode {
        let mut output = self.output.clone();
        output.push(output_symbol);
        TreeNode {
            output,
            input_pos: self.input_pos,
            mutator_state: self.mutator_state,
            lexicon_state: next_lexicon,
            flags: self.flags.clone(),
            weight: self.weight + weight,
        }
    }

    /// Advances only the mutator half, appending `output_symbol` to the output tape.
    pub fn update_mutator(&self, output_symbol: SymbolNumber, next_mutator: TransitionTableIndex, weight: Weight) -> TreeNode {
        let mut output = self.output.clone();
        output.push(output_symbol);
        TreeNode {
            output,
            input_pos: self.input_pos,
            mutator_state: next_mutator,
            lexicon_state: self.lexicon_state,
            flags: self.flags.clone(),
            weight: self.weight + weight,
        }
    }

    /// Advances both halves in lockstep after consuming one input symbol.
    pub fn update_both(
        &self,
        output_symbol: SymbolNumber,
        next_input_pos: usize,
        next_mutator: TransitionTableIndex,
        next_lexicon: TransitionTableIndex,
        weight: Weight,
    ) -> TreeNode {
        let mut output = self.output.clone();
        output.push(output_symbol);
        TreeNode {
            output,
            input_pos: next_input_pos,
            mutator_state: next_mutator,
            lexicon_state: next_lexicon,
            flags: self.flags.clone(),
            weight: self.weight + weight,
        }
    }

    /// Advances both halves while holding the input position fixed (an epsilon step on
    /// one side, taken in the joint-advance variant used by `consume_input`).
    pub fn update_both_same_input(
        &self,
        output_symbol: SymbolNumber,
        next_mutator: TransitionTableIndex,
        next_lexicon: TransitionTableIndex,
        weight: Weight,
    ) -> TreeNode {
        self.update_both(output_symbol, self.input_pos, next_mutator, next_lexicon, weight)
    }

    /// Returns a copy with the flag state replaced, used after a flag diacritic
    /// operation succeeds (spec section 4.6.3: `try_compatible_with`).
    pub fn with_flags(&self, flags: FlagState) -> TreeNode {
        TreeNode { flags, ..self.clone() }
    }

    /// Renders the output tape to a string via the lexicon's key table, skipping empty
    /// key-table entries (flags, and epsilon) as `stringify` does in the reference
    /// implementation.
    pub fn stringify(&self, key_table: &[SmolStr]) -> SmolStr {
        let mut s = String::new();
        for &sym in &self.output {
            if let Some(piece) = key_table.get(sym as usize) {
                s.push_str(piece.as_str());
            }
        }
        SmolStr::new(s)
    }
}
