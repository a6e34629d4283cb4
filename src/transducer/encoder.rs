//! C3: UTF-8 tokenization into symbol numbers (spec section 4.3).
//!
//! A direct port of the reference implementation's `LetterTrie`/`Encoder` pair: ASCII
//! bytes are looked up in a flat table, everything else walks a byte trie built from the
//! alphabet's multi-byte symbol spellings, longest match first.

use hashbrown::HashMap;

use crate::constants::NO_SYMBOL;
use crate::transducer::alphabet::TransducerAlphabet;
use crate::types::SymbolNumber;

#[derive(Debug, Default, Clone)]
struct LetterTrie {
    children: HashMap<u8, LetterTrie>,
    symbols: HashMap<u8, SymbolNumber>,
}

impl LetterTrie {
    fn add_string(&mut self, bytes: &[u8], symbol: SymbolNumber) {
        if bytes.len() == 1 {
            self.symbols.insert(bytes[0], symbol);
            return;
        }
        self.children.entry(bytes[0]).or_default().add_string(&bytes[1..], symbol);
    }

    /// Attempts the longest match starting at `input[*pos..]`, advancing `*pos` past
    /// whatever it consumes. Returns `NO_SYMBOL` (and leaves `*pos` untouched) on no
    /// match at all.
    fn find_key(&self, input: &[u8], pos: &mut usize) -> SymbolNumber {
        let byte = match input.get(*pos) {
            Some(&b) => b,
            None => return NO_SYMBOL,
        };
        *pos += 1;
        if let Some(child) = self.children.get(&byte) {
            let sym = child.find_key(input, pos);
            if sym != NO_SYMBOL {
                return sym;
            }
            *pos -= 1;
        }
        self.symbols.get(&byte).copied().unwrap_or(NO_SYMBOL)
    }
}

/// Tokenizes raw input bytes into the symbol numbers of a particular alphabet.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    ascii_symbols: [SymbolNumber; 128],
    letters: LetterTrie,
}

impl Encoder {
    pub fn new(alphabet: &TransducerAlphabet, input_symbol_count: SymbolNumber) -> Encoder {
        let mut encoder = Encoder {
            ascii_symbols: [NO_SYMBOL; 128],
            letters: LetterTrie::default(),
        };
        for (k, key) in alphabet.key_table().iter().enumerate().take(input_symbol_count as usize) {
            let bytes = key.as_bytes();
            if bytes.is_empty() {
                continue;
            }
            if bytes.len() == 1 && bytes[0] <= 127 {
                encoder.ascii_symbols[bytes[0] as usize] = k as SymbolNumber;
            }
            encoder.letters.add_string(bytes, k as SymbolNumber);
        }
        encoder
    }

    /// Matches the longest known symbol starting at `input[*pos..]`, advancing `*pos`.
    /// Returns `NO_SYMBOL` without moving `*pos` if nothing in the alphabet matches
    /// there.
    pub fn find_key(&self, input: &[u8], pos: &mut usize) -> SymbolNumber {
        match input.get(*pos) {
            Some(&b) if b <= 127 && self.ascii_symbols[b as usize] != NO_SYMBOL => {
                *pos += 1;
                self.ascii_symbols[b as usize]
            }
            _ => self.letters.find_key(input, pos),
        }
    }
}

/// Width in bytes of the UTF-8 sequence starting with `lead`, or `0` if `lead` is not a
/// valid UTF-8 lead byte (spec section 4.3, `nbyte_utf8`).
pub fn utf8_sequence_len(lead: u8) -> usize {
    if lead <= 0b0111_1111 {
        1
    } else if lead & 0b1111_1000 == 0b1111_0000 {
        4
    } else if lead & 0b1111_0000 == 0b1110_0000 {
        3
    } else if lead & 0b1110_0000 == 0b1100_0000 {
        2
    } else {
        0
    }
}

/// Tokenizes a whole input string into symbol numbers (spec section 4.3,
/// `InputString::initialize`). Each maximal run of bytes the encoder can't recognize is
/// folded byte-by-byte into whole UTF-8 characters and mapped to `other`, if the
/// alphabet has one; without an `other` symbol, or on invalid UTF-8, tokenization fails
/// and `None` is returned, matching the reference's "admit failure" behaviour.
pub fn tokenize(encoder: &Encoder, input: &str, other: Option<SymbolNumber>) -> Option<Vec<SymbolNumber>> {
    let bytes = input.as_bytes();
    let mut pos = 0usize;
    let mut out = Vec::new();

    while pos < bytes.len() {
        let start = pos;
        let sym = encoder.find_key(bytes, &mut pos);
        if sym != NO_SYMBOL {
            out.push(sym);
            continue;
        }
        pos = start;
        let n = utf8_sequence_len(bytes[start]);
        if n == 0 {
            return None;
        }
        let other = other?;
        pos = start + n;
        out.push(other);
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet_with(symbols: &[&str]) -> TransducerAlphabet {
        let mut buf = Vec::new();
        for s in symbols {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
        }
        TransducerAlphabet::new(&buf, symbols.len() as SymbolNumber).unwrap()
    }

    #[test]
    fn tokenizes_ascii_by_table_lookup() {
        let alphabet = alphabet_with(&["", "a", "b", "c"]);
        let encoder = Encoder::new(&alphabet, 4);
        let toks = tokenize(&encoder, "cab", None).unwrap();
        assert_eq!(toks, vec![3, 1, 2]);
    }

    #[test]
    fn tokenizes_multibyte_symbols_via_trie() {
        let alphabet = alphabet_with(&["", "\u{e1}", "a"]); // "á", "a"
        let encoder = Encoder::new(&alphabet, 3);
        let toks = tokenize(&encoder, "\u{e1}a", None).unwrap();
        assert_eq!(toks, vec![1, 2]);
    }

    #[test]
    fn falls_back_to_other_for_unknown_characters() {
        let alphabet = alphabet_with(&["", "a"]);
        let encoder = Encoder::new(&alphabet, 2);
        let toks = tokenize(&encoder, "a\u{e1}b", Some(99)).unwrap();
        assert_eq!(toks, vec![1, 99, 99]);
    }

    #[test]
    fn fails_without_other_symbol_for_unknown_input() {
        let alphabet = alphabet_with(&["", "a"]);
        let encoder = Encoder::new(&alphabet, 2);
        assert!(tokenize(&encoder, "a\u{e1}", None).is_none());
    }

    #[test]
    fn utf8_sequence_len_matches_lead_byte_width() {
        assert_eq!(utf8_sequence_len(b'a'), 1);
        assert_eq!(utf8_sequence_len(0b1100_0001), 2);
        assert_eq!(utf8_sequence_len(0b1110_0001), 3);
        assert_eq!(utf8_sequence_len(0b1111_0001), 4);
        assert_eq!(utf8_sequence_len(0b1000_0000), 0);
    }
}
