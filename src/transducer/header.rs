//! C1: the fixed-size preamble of an OL transducer file (spec section 4.1, 6.1).

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::HFST3_HEADER_MAGIC;
use crate::error::HeaderParseError;
use crate::types::{HeaderFlag, SymbolNumber, TransitionTableIndex};

/// The header's nine boolean properties, in on-disk order.
const PROPERTY_ORDER: [HeaderFlag; 9] = [
    HeaderFlag::Weighted,
    HeaderFlag::Deterministic,
    HeaderFlag::InputDeterministic,
    HeaderFlag::Minimized,
    HeaderFlag::Cyclic,
    HeaderFlag::HasEpsilonEpsilonTransitions,
    HeaderFlag::HasInputEpsilonTransitions,
    HeaderFlag::HasInputEpsilonCycles,
    HeaderFlag::HasUnweightedInputEpsilonCycles,
];

#[derive(Debug, Clone)]
pub struct TransducerHeader {
    input_symbol_count: SymbolNumber,
    symbol_count: SymbolNumber,
    index_table_size: TransitionTableIndex,
    target_table_size: TransitionTableIndex,
    state_count: TransitionTableIndex,
    transition_count: TransitionTableIndex,
    flags: [bool; 9],
    /// Total bytes consumed from the start of the buffer, including any HFST3 wrapper.
    len: usize,
}

impl TransducerHeader {
    /// Parses the header (and optional HFST3 wrapper) starting at `buf[0]`.
    pub fn new(buf: &[u8]) -> Result<TransducerHeader, HeaderParseError> {
        let mut offset = skip_hfst3_wrapper(buf)?;

        let need = offset + 2 * std::mem::size_of::<SymbolNumber>() + 4 * std::mem::size_of::<u32>();
        if buf.len() < need {
            return Err(HeaderParseError::UnexpectedEof(buf.len()));
        }

        let input_symbol_count = LittleEndian::read_u16(&buf[offset..]);
        offset += 2;
        let symbol_count = LittleEndian::read_u16(&buf[offset..]);
        offset += 2;
        let index_table_size = LittleEndian::read_u32(&buf[offset..]);
        offset += 4;
        let target_table_size = LittleEndian::read_u32(&buf[offset..]);
        offset += 4;
        let state_count = LittleEndian::read_u32(&buf[offset..]);
        offset += 4;
        let transition_count = LittleEndian::read_u32(&buf[offset..]);
        offset += 4;

        if buf.len() < offset + 9 * 4 {
            return Err(HeaderParseError::UnexpectedEof(buf.len()));
        }

        let mut flags = [false; 9];
        for flag in flags.iter_mut() {
            let raw = LittleEndian::read_u32(&buf[offset..]);
            *flag = raw != 0;
            offset += 4;
        }

        Ok(TransducerHeader {
            input_symbol_count,
            symbol_count,
            index_table_size,
            target_table_size,
            state_count,
            transition_count,
            flags,
            len: offset,
        })
    }

    /// Total byte length of the header as parsed, including any HFST3 wrapper. The
    /// alphabet begins immediately after this offset.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn input_symbol_count(&self) -> SymbolNumber {
        self.input_symbol_count
    }

    pub fn symbol_count(&self) -> SymbolNumber {
        self.symbol_count
    }

    pub fn index_table_size(&self) -> usize {
        self.index_table_size as usize
    }

    pub fn target_table_size(&self) -> usize {
        self.target_table_size as usize
    }

    pub fn state_count(&self) -> TransitionTableIndex {
        self.state_count
    }

    pub fn transition_count(&self) -> TransitionTableIndex {
        self.transition_count
    }

    pub fn has_flag(&self, flag: HeaderFlag) -> bool {
        let idx = PROPERTY_ORDER.iter().position(|f| *f == flag).expect("exhaustive flag list");
        self.flags[idx]
    }
}

/// Consumes the optional `"HFST\0"` wrapper (spec section 4.1), returning the offset of
/// the mandatory payload. If the magic bytes aren't present at all, the wrapper is
/// treated as absent and offset `0` is returned (the bytes are conceptually "pushed
/// back").
fn skip_hfst3_wrapper(buf: &[u8]) -> Result<usize, HeaderParseError> {
    if buf.len() < HFST3_HEADER_MAGIC.len() || &buf[..HFST3_HEADER_MAGIC.len()] != HFST3_HEADER_MAGIC {
        return Ok(0);
    }

    let mut offset = HFST3_HEADER_MAGIC.len();
    if buf.len() < offset + 2 {
        return Err(HeaderParseError::UnexpectedEof(buf.len()));
    }
    let remaining = LittleEndian::read_u16(&buf[offset..]) as usize;
    offset += 2;

    if buf.len() < offset + remaining {
        return Err(HeaderParseError::UnexpectedEof(buf.len()));
    }
    let props = &buf[offset..offset + remaining];
    offset += remaining;

    // `props` is a NUL-terminated `key=value\n...` properties string.
    let nul_pos = props.iter().position(|&b| b == 0).ok_or(HeaderParseError::MissingWrapperTerminator)?;
    let props_str = String::from_utf8_lossy(&props[..nul_pos]);

    if !props_str.contains("type=HFST_OL") && !props_str.contains("type=HFST_OLW") {
        return Err(HeaderParseError::WrongWrapperType(props_str.into_owned()));
    }

    Ok(offset)
}
