//! C2: symbol <-> string mapping and flag diacritic table (spec section 4.2).

use hashbrown::HashMap;
use smol_str::SmolStr;

use crate::constants::NO_SYMBOL;
use crate::error::AlphabetParseError;
use crate::types::{FlagDiacriticOperation, FlagDiacriticOperator, OperationsMap, SymbolNumber, ValueNumber};

/// The alphabet of a single transducer: symbol numbers, their UTF-8 spellings, the flag
/// diacritic operations they encode (if any), and the designated "other" symbol.
#[derive(Debug, Clone)]
pub struct TransducerAlphabet {
    key_table: Vec<SmolStr>,
    string_to_symbol: HashMap<SmolStr, SymbolNumber>,
    operations: OperationsMap,
    other_symbol: Option<SymbolNumber>,
    flag_state_size: SymbolNumber,
    /// Number of bytes consumed from the input buffer, including trailing NUL padding.
    len: usize,
}

struct Parser {
    key_table: Vec<SmolStr>,
    string_to_symbol: HashMap<SmolStr, SymbolNumber>,
    operations: OperationsMap,
    other_symbol: Option<SymbolNumber>,
    feature_bucket: HashMap<SmolStr, SymbolNumber>,
    value_bucket: HashMap<SmolStr, ValueNumber>,
    next_value: ValueNumber,
    next_feature: SymbolNumber,
}

impl Parser {
    fn new() -> Parser {
        let mut value_bucket = HashMap::new();
        value_bucket.insert(SmolStr::new(""), 0);
        Parser {
            key_table: Vec::with_capacity(64),
            string_to_symbol: HashMap::new(),
            operations: HashMap::new(),
            other_symbol: None,
            feature_bucket: HashMap::new(),
            value_bucket,
            next_value: 1,
            next_feature: 0,
        }
    }

    fn intern_feature(&mut self, feature: &str) -> SymbolNumber {
        if let Some(&id) = self.feature_bucket.get(feature) {
            return id;
        }
        let id = self.next_feature;
        self.feature_bucket.insert(feature.into(), id);
        self.next_feature += 1;
        id
    }

    fn intern_value(&mut self, value: &str) -> ValueNumber {
        if let Some(&id) = self.value_bucket.get(value) {
            return id;
        }
        let id = self.next_value;
        self.value_bucket.insert(value.into(), id);
        self.next_value += 1;
        id
    }

    /// Parses `@op.feature[.value]@` into a [`FlagDiacriticOperation`], storing the
    /// operation and leaving the symbol's key-table entry empty (spec section 4.2).
    fn handle_flag_diacritic(&mut self, symbol: SymbolNumber, key: &str) {
        let inner = &key[1..key.len() - 1]; // strip the surrounding '@'s
        let mut chunks = inner.split('.');
        let op_str = chunks.next().unwrap_or("");
        let feature = chunks.next().unwrap_or("");
        let value = chunks.next().unwrap_or("");

        let operation = match FlagDiacriticOperator::from_str(op_str) {
            Some(op) => op,
            None => {
                log::warn!("unrecognized flag diacritic operator {:?} in {:?}", op_str, key);
                self.key_table.push(SmolStr::new(""));
                return;
            }
        };

        let feature_id = self.intern_feature(feature);
        let value_id = self.intern_value(value);

        self.operations.insert(
            symbol,
            FlagDiacriticOperation {
                operation,
                feature: feature_id,
                value: value_id,
            },
        );
        self.key_table.push(SmolStr::new(""));
    }

    fn handle_bracketed_symbol(&mut self, symbol: SymbolNumber, key: &str) {
        let bytes = key.as_bytes();
        if key.len() >= 5 && bytes[2] == b'.' {
            self.handle_flag_diacritic(symbol, key);
        } else if key == "@_UNKNOWN_SYMBOL_@" || key == "@?@" {
            self.other_symbol = Some(symbol);
            self.key_table.push(SmolStr::new(""));
        } else {
            // Other bracketed alphabet entries (e.g. @_IDENTITY_SYMBOL_@) are recorded
            // verbatim but otherwise carry no special meaning for this core.
            log::debug!("unhandled bracketed alphabet symbol: {:?}", key);
            self.key_table.push(SmolStr::new(""));
        }
    }

    fn parse(mut self, buf: &[u8], symbol_count: SymbolNumber) -> Result<TransducerAlphabet, AlphabetParseError> {
        let mut offset = 0usize;

        for i in 0..symbol_count {
            if offset >= buf.len() {
                return Err(AlphabetParseError::UnexpectedEof(i as usize));
            }
            let start = offset;
            while buf.get(offset).copied().unwrap_or(0) != 0 {
                offset += 1;
                if offset > buf.len() {
                    return Err(AlphabetParseError::MissingTerminator(i as usize));
                }
            }
            if offset >= buf.len() {
                return Err(AlphabetParseError::MissingTerminator(i as usize));
            }
            let key = String::from_utf8_lossy(&buf[start..offset]).into_owned();
            offset += 1; // consume the NUL terminator

            if i == 0 {
                // Symbol 0 denotes epsilon regardless of the file's spelling for it.
                self.key_table.push(SmolStr::new(""));
                continue;
            }

            if key.len() > 1 && key.starts_with('@') && key.ends_with('@') {
                self.handle_bracketed_symbol(i, &key);
            } else {
                let interned: SmolStr = key.into();
                self.string_to_symbol.insert(interned.clone(), i);
                self.key_table.push(interned);
            }
        }

        // Trailing NUL padding bytes, if any, round the alphabet section out to its
        // declared size; consume them so the index table begins at the right offset.
        while buf.get(offset).copied() == Some(0) {
            offset += 1;
        }

        Ok(TransducerAlphabet {
            key_table: self.key_table,
            string_to_symbol: self.string_to_symbol,
            operations: self.operations,
            other_symbol: self.other_symbol,
            flag_state_size: self.next_feature,
            len: offset,
        })
    }
}

impl TransducerAlphabet {
    pub fn new(buf: &[u8], symbol_count: SymbolNumber) -> Result<TransducerAlphabet, AlphabetParseError> {
        Parser::new().parse(buf, symbol_count)
    }

    pub fn key_table(&self) -> &[SmolStr] {
        &self.key_table
    }

    pub fn string_to_symbol(&self) -> &HashMap<SmolStr, SymbolNumber> {
        &self.string_to_symbol
    }

    pub fn operations(&self) -> &OperationsMap {
        &self.operations
    }

    pub fn is_flag(&self, symbol: SymbolNumber) -> bool {
        self.operations.contains_key(&symbol)
    }

    pub fn other_symbol(&self) -> Option<SymbolNumber> {
        self.other_symbol
    }

    /// Number of distinct features discovered, i.e. the required length of a
    /// [`crate::transducer::flag::FlagState`] vector for this alphabet.
    pub fn flag_state_size(&self) -> SymbolNumber {
        self.flag_state_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn add_symbol(&mut self, string: &SmolStr) -> SymbolNumber {
        let id = self.key_table.len() as SymbolNumber;
        self.string_to_symbol.insert(string.clone(), id);
        self.key_table.push(string.clone());
        id
    }

    /// Builds the mutator -> lexicon symbol translator described in spec section 3,
    /// invariant 6: for every mutator symbol, find (or add) the lexicon symbol with the
    /// same UTF-8 spelling. Flags and the mutator's "other" symbol always translate to
    /// `NO_SYMBOL`, as does any mutator symbol whose spelling the lexicon doesn't know
    /// and which this alphabet declines to add (see `create_translator_from`'s doc).
    pub fn create_translator_from(&mut self, mutator: &TransducerAlphabet) -> Vec<SymbolNumber> {
        let from_keys = mutator.key_table();
        let mut translator = Vec::with_capacity(from_keys.len());
        translator.push(0); // symbol 0 is always epsilon on both sides

        for (i, from_sym) in from_keys.iter().enumerate().skip(1) {
            let i = i as SymbolNumber;
            if mutator.is_flag(i) || Some(i) == mutator.other_symbol() {
                translator.push(NO_SYMBOL);
                continue;
            }
            if let Some(&sym) = self.string_to_symbol.get(from_sym) {
                translator.push(sym);
            } else if from_sym.is_empty() {
                // Symbols with no UTF-8 spelling (other bracketed entries) never
                // translate; adding an empty-string symbol would collide with epsilon.
                translator.push(NO_SYMBOL);
            } else {
                log::warn!("symbol {:?} from error model not present in lexicon", from_sym);
                translator.push(self.add_symbol(from_sym));
            }
        }

        translator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(symbols: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        for s in symbols {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
        }
        buf
    }

    #[test]
    fn symbol_zero_is_forced_epsilon() {
        let buf = build(&["whatever", "cat"]);
        let alphabet = TransducerAlphabet::new(&buf, 2).unwrap();
        assert_eq!(alphabet.key_table()[0], "");
        assert_eq!(alphabet.key_table()[1], "cat");
    }

    #[test]
    fn parses_flag_diacritic() {
        let buf = build(&["", "@P.CASE.UPPER@", "@R.CASE.UPPER@"]);
        let alphabet = TransducerAlphabet::new(&buf, 3).unwrap();
        assert!(alphabet.is_flag(1));
        assert!(alphabet.is_flag(2));
        let p = alphabet.operations()[&1];
        let r = alphabet.operations()[&2];
        assert_eq!(p.operation, FlagDiacriticOperator::P);
        assert_eq!(r.operation, FlagDiacriticOperator::R);
        // Same feature, same value, interned consistently.
        assert_eq!(p.feature, r.feature);
        assert_eq!(p.value, r.value);
        assert_eq!(alphabet.flag_state_size(), 1);
    }

    #[test]
    fn recognizes_unknown_symbol() {
        let buf = build(&["", "@_UNKNOWN_SYMBOL_@", "x"]);
        let alphabet = TransducerAlphabet::new(&buf, 3).unwrap();
        assert_eq!(alphabet.other_symbol(), Some(1));
        assert_eq!(alphabet.key_table()[1], "");
    }

    #[test]
    fn recognizes_legacy_unknown_symbol() {
        let buf = build(&["", "@?@"]);
        let alphabet = TransducerAlphabet::new(&buf, 2).unwrap();
        assert_eq!(alphabet.other_symbol(), Some(1));
    }

    #[test]
    fn translator_maps_matching_strings_and_blanks_flags() {
        let lex_buf = build(&["", "a", "b"]);
        let mut lexicon = TransducerAlphabet::new(&lex_buf, 3).unwrap();

        let mut_buf = build(&["", "a", "@P.X.Y@", "@_UNKNOWN_SYMBOL_@", "c"]);
        let mutator = TransducerAlphabet::new(&mut_buf, 5).unwrap();

        let translator = lexicon.create_translator_from(&mutator);
        assert_eq!(translator[0], 0);
        assert_eq!(translator[1], 1); // "a" -> lexicon's "a"
        assert_eq!(translator[2], NO_SYMBOL); // flag
        assert_eq!(translator[3], NO_SYMBOL); // other
        assert_ne!(translator[4], NO_SYMBOL); // "c" gets added to lexicon
        assert_eq!(lexicon.key_table()[translator[4] as usize], "c");
    }
}
