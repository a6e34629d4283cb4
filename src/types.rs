//! Shared scalar types used throughout the transducer and search core.
//!
//! These mirror `hfst_ol::SymbolNumber`/`TransitionTableIndex`/`Weight` etc. from the
//! original C++ (`hfst-ol.h`), kept as distinct type aliases rather than bare `u16`/`u32`
//! so the tables below read the way the format's own documentation does.

use hashbrown::HashMap;

/// An unsigned 16-bit symbol id. `0` is epsilon; [`crate::constants::NO_SYMBOL`] is the
/// "no such symbol" sentinel.
pub type SymbolNumber = u16;

/// An index into either the index table or the transition table, the two address
/// spaces distinguished by [`crate::constants::TARGET_TABLE`].
pub type TransitionTableIndex = u32;

/// A tropical-semiring edit/unigram cost: non-negative, summed along a path, minimized
/// across paths.
pub type Weight = f32;

/// Interned feature or value id used by flag diacritics.
pub type ValueNumber = i16;

/// The six flag-diacritic operators (spec section 4.5), named as in Beesley & Karttunen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagDiacriticOperator {
    P,
    N,
    R,
    D,
    C,
    U,
}

impl FlagDiacriticOperator {
    /// Parses the operator letter out of a flag diacritic's leading chunk (e.g. the `P`
    /// in `@P.CASE.UPPER@`).
    pub fn from_str(s: &str) -> Option<FlagDiacriticOperator> {
        match s {
            "P" => Some(FlagDiacriticOperator::P),
            "N" => Some(FlagDiacriticOperator::N),
            "R" => Some(FlagDiacriticOperator::R),
            "D" => Some(FlagDiacriticOperator::D),
            "C" => Some(FlagDiacriticOperator::C),
            "U" => Some(FlagDiacriticOperator::U),
            _ => None,
        }
    }
}

/// A single flag diacritic: `@op.feature[.value]@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDiacriticOperation {
    pub operation: FlagDiacriticOperator,
    pub feature: SymbolNumber,
    pub value: ValueNumber,
}

/// Symbol number -> flag diacritic operation, populated during alphabet load.
pub type OperationsMap = HashMap<SymbolNumber, FlagDiacriticOperation>;

/// One of the nine boolean header properties (spec section 4.1), in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFlag {
    Weighted,
    Deterministic,
    InputDeterministic,
    Minimized,
    Cyclic,
    HasEpsilonEpsilonTransitions,
    HasInputEpsilonTransitions,
    HasInputEpsilonCycles,
    HasUnweightedInputEpsilonCycles,
}
