//! Assembles header + alphabet + tables into a usable transducer, and implements the
//! OL traversal protocol over them (spec sections 4.1-4.4, 6.1).

use crate::constants::{INDEX_TABLE_SIZE, TARGET_TABLE, TRANS_TABLE_SIZE};
use crate::error::{TableReadError, TransducerLoadError};
use crate::transducer::alphabet::TransducerAlphabet;
use crate::transducer::buffer::SharedBuffer;
use crate::transducer::encoder::Encoder;
use crate::transducer::header::TransducerHeader;
use crate::transducer::index_table::IndexTable;
use crate::transducer::symbol_transition::SymbolTransition;
use crate::transducer::transition_table::TransitionTable;
use crate::transducer::Transducer;
use crate::types::{HeaderFlag, SymbolNumber, TransitionTableIndex, Weight};

/// A loaded optimized-lookup transducer: one `Speller` combines one of these as the
/// error model ("mutator") and one as the lexicon.
#[derive(Debug, Clone)]
pub struct HfstTransducer {
    alphabet: TransducerAlphabet,
    encoder: Encoder,
    index_table: IndexTable,
    transition_table: TransitionTable,
}

impl HfstTransducer {
    /// Parses an OL transducer out of `buf` (spec section 6.1): header, then alphabet,
    /// then the index table, then the transition table, laid out back to back. Rejects
    /// unweighted transducers, per spec section 2's scope.
    pub fn from_buffer(buf: SharedBuffer) -> Result<HfstTransducer, TransducerLoadError> {
        let bytes: &[u8] = (*buf).as_ref();

        let header = TransducerHeader::new(bytes)?;
        if !header.has_flag(HeaderFlag::Weighted) {
            return Err(TransducerLoadError::Unweighted);
        }

        let alphabet_start = header.len();
        let alphabet = TransducerAlphabet::new(&bytes[alphabet_start..], header.symbol_count())?;
        let encoder = Encoder::new(&alphabet, header.input_symbol_count());

        let index_start = alphabet_start + alphabet.len();
        let index_count = header.index_table_size() as u32;
        let index_end = index_start + header.index_table_size() * INDEX_TABLE_SIZE;
        if index_end > bytes.len() {
            return Err(TableReadError::IndexTableTruncated {
                expected: index_count,
                found: ((bytes.len().saturating_sub(index_start)) / INDEX_TABLE_SIZE) as u32,
            }
            .into());
        }
        let index_table = IndexTable::new(buf.clone(), index_start, bytes.len(), index_count);

        let transition_start = index_end;
        let transition_count = header.target_table_size() as u32;
        let transition_end = transition_start + header.target_table_size() * TRANS_TABLE_SIZE;
        if transition_end > bytes.len() {
            return Err(TableReadError::TransitionTableTruncated {
                expected: transition_count,
                found: ((bytes.len().saturating_sub(transition_start)) / TRANS_TABLE_SIZE) as u32,
            }
            .into());
        }
        let transition_table = TransitionTable::new(buf.clone(), transition_start, bytes.len(), transition_count);

        Ok(HfstTransducer {
            alphabet,
            encoder,
            index_table,
            transition_table,
        })
    }
}

impl Transducer for HfstTransducer {
    fn alphabet(&self) -> &TransducerAlphabet {
        &self.alphabet
    }

    fn mut_alphabet(&mut self) -> &mut TransducerAlphabet {
        &mut self.alphabet
    }

    fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    fn is_final(&self, i: TransitionTableIndex) -> bool {
        if i >= TARGET_TABLE {
            self.transition_table.is_final(i - TARGET_TABLE)
        } else {
            self.index_table.is_final(i)
        }
    }

    fn final_weight(&self, i: TransitionTableIndex) -> Option<Weight> {
        if i >= TARGET_TABLE {
            if self.transition_table.is_final(i - TARGET_TABLE) {
                self.transition_table.weight(i - TARGET_TABLE)
            } else {
                None
            }
        } else {
            self.index_table.final_weight(i)
        }
    }

    fn has_transitions(&self, i: TransitionTableIndex, symbol: Option<SymbolNumber>) -> bool {
        let symbol = match symbol {
            Some(s) => s,
            None => return false,
        };
        if i >= TARGET_TABLE {
            self.transition_table.input_symbol(i - TARGET_TABLE) == Some(symbol)
        } else {
            self.index_table.input_symbol(i + symbol as TransitionTableIndex) == Some(symbol)
        }
    }

    fn has_epsilons_or_flags(&self, i: TransitionTableIndex) -> bool {
        if i >= TARGET_TABLE {
            match self.transition_table.input_symbol(i - TARGET_TABLE) {
                Some(sym) => sym == 0 || self.alphabet.is_flag(sym),
                None => false,
            }
        } else {
            self.index_table.input_symbol(i) == Some(0)
        }
    }

    fn take_epsilons(&self, i: TransitionTableIndex) -> Option<SymbolTransition> {
        if self.transition_table.input_symbol(i) == Some(0) {
            Some(self.transition_table.symbol_transition(i))
        } else {
            None
        }
    }

    fn take_epsilons_and_flags(&self, i: TransitionTableIndex) -> Option<SymbolTransition> {
        let sym = self.transition_table.input_symbol(i)?;
        if sym == 0 || self.alphabet.is_flag(sym) {
            Some(self.transition_table.symbol_transition(i))
        } else {
            None
        }
    }

    fn take_non_epsilons(&self, i: TransitionTableIndex, symbol: SymbolNumber) -> Option<SymbolTransition> {
        if self.transition_table.input_symbol(i) == Some(symbol) {
            Some(self.transition_table.symbol_transition(i))
        } else {
            None
        }
    }

    fn next(&self, i: TransitionTableIndex, symbol: SymbolNumber) -> Option<TransitionTableIndex> {
        if i >= TARGET_TABLE {
            Some(i - TARGET_TABLE + 1)
        } else {
            let target = self.index_table.target(i + 1 + symbol as TransitionTableIndex)?;
            Some(target - TARGET_TABLE)
        }
    }

    fn transition_input_symbol(&self, i: TransitionTableIndex) -> Option<SymbolNumber> {
        self.transition_table.input_symbol(i)
    }
}

