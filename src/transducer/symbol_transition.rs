//! A single taken transition, as returned by `take_epsilons`/`take_non_epsilons`/etc.

use crate::types::{SymbolNumber, TransitionTableIndex, Weight};

/// The result of successfully matching a transition at some table index: where it goes,
/// what it outputs, and its cost. Mirrors `hfst_ol::STransition` from the reference
/// implementation, minus the "symbol == NO_SYMBOL means no match" encoding (we use
/// `Option` for that instead).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolTransition {
    pub target: TransitionTableIndex,
    pub output_symbol: SymbolNumber,
    pub weight: Weight,
}

impl SymbolTransition {
    pub fn new(target: TransitionTableIndex, output_symbol: SymbolNumber, weight: Weight) -> SymbolTransition {
        SymbolTransition { target, output_symbol, weight }
    }
}
