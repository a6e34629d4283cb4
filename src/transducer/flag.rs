//! C5: the flag-diacritic engine (spec section 4.5).

use crate::types::{FlagDiacriticOperation, FlagDiacriticOperator, ValueNumber};

/// Per-branch feature-value vector. Index `f` holds the current value for feature `f`;
/// `0` means unset. Length is fixed at [`crate::transducer::alphabet::TransducerAlphabet::flag_state_size`]
/// for the lexicon in use (spec section 3, invariant 2).
pub type FlagState = Vec<ValueNumber>;

/// Evaluates `op` against `state`, mutating it in place per spec section 4.5's table.
/// Returns whether the branch may proceed; on `false` the caller must discard any
/// mutation this call made (callers achieve this by operating on a scratch copy of the
/// parent's flag state, see [`crate::speller::worker`]).
pub fn apply(state: &mut FlagState, op: &FlagDiacriticOperation) -> bool {
    let f = op.feature as usize;
    match op.operation {
        FlagDiacriticOperator::P => {
            state[f] = op.value;
            true
        }
        FlagDiacriticOperator::N => {
            state[f] = -op.value;
            true
        }
        FlagDiacriticOperator::R => {
            if op.value == 0 {
                state[f] != 0
            } else {
                state[f] == op.value
            }
        }
        FlagDiacriticOperator::D => {
            if op.value == 0 {
                state[f] == 0
            } else {
                state[f] != op.value
            }
        }
        FlagDiacriticOperator::C => {
            state[f] = 0;
            true
        }
        FlagDiacriticOperator::U => {
            let cur = state[f];
            if cur == 0 || cur == op.value || (cur < 0 && -cur != op.value) {
                state[f] = op.value;
                true
            } else {
                false
            }
        }
    }
}
