//! The two round-trip laws of spec section 8: tokenize-then-stringify reproduces the
//! original surface string, and a header with no wrapper and all-0/1 flag words
//! re-serializes byte-identical to what was parsed.

mod support;

use support::{build_transducer, IndexRow as I, TransitionRow as T};
use wfst_speller::transducer::encoder::tokenize;
use wfst_speller::transducer::tree_node::TreeNode;
use wfst_speller::transducer::Transducer;

const C: u16 = 1;
const A: u16 = 2;
const TEE: u16 = 3;

fn lexicon() -> wfst_speller::transducer::hfst::HfstTransducer {
    let symbols = ["", "c", "a", "t"];
    let transitions = [
        T::new(C, C, 1, 0.0),
        T::new(A, A, 2, 0.0),
        T::new(TEE, TEE, 3, 0.0),
    ];
    let index = vec![
        I::none(),
        I::none(),
        I::edge(C, 0),
        I::none(),
        I::none(),
        I::none(),
        I::none(),
        I::none(),
        I::edge(A, 1),
        I::none(),
        I::none(),
        I::none(),
        I::none(),
        I::edge(TEE, 2),
        I::none(),
        I::final_marker(1.0),
        I::none(),
        I::none(),
        I::none(),
    ];
    build_transducer(&symbols, &index, &transitions)
}

#[test]
fn tokenize_then_stringify_reproduces_the_input() {
    let lexicon = lexicon();
    let input = tokenize(lexicon.encoder(), "cat", lexicon.alphabet().other_symbol()).expect("cat tokenizes cleanly");

    let mut node = TreeNode::start(lexicon.alphabet().flag_state_size() as usize);
    for &symbol in &input {
        node = node.update_lexicon(symbol, 0, 0.0);
    }

    assert_eq!(node.stringify(lexicon.alphabet().key_table()), "cat");
}

#[test]
fn header_round_trips_when_unwrapped_and_flags_are_boolean() {
    use byteorder::{ByteOrder, LittleEndian};
    use wfst_speller::transducer::header::TransducerHeader;

    let mut buf = Vec::new();
    buf.extend_from_slice(&3u16.to_le_bytes()); // input_symbol_count
    buf.extend_from_slice(&3u16.to_le_bytes()); // symbol_count
    buf.extend_from_slice(&1u32.to_le_bytes()); // index_table_size
    buf.extend_from_slice(&1u32.to_le_bytes()); // target_table_size
    buf.extend_from_slice(&1u32.to_le_bytes()); // state_count
    buf.extend_from_slice(&1u32.to_le_bytes()); // transition_count
    buf.extend_from_slice(&1u32.to_le_bytes()); // weighted
    for _ in 0..8 {
        buf.extend_from_slice(&0u32.to_le_bytes());
    }

    let header = TransducerHeader::new(&buf).expect("well-formed unwrapped header parses");

    let mut reserialized = Vec::new();
    reserialized.extend_from_slice(&header.input_symbol_count().to_le_bytes());
    reserialized.extend_from_slice(&header.symbol_count().to_le_bytes());
    reserialized.extend_from_slice(&(header.index_table_size() as u32).to_le_bytes());
    reserialized.extend_from_slice(&(header.target_table_size() as u32).to_le_bytes());
    reserialized.extend_from_slice(&header.state_count().to_le_bytes());
    reserialized.extend_from_slice(&header.transition_count().to_le_bytes());
    for flag in [
        wfst_speller::types::HeaderFlag::Weighted,
        wfst_speller::types::HeaderFlag::Deterministic,
        wfst_speller::types::HeaderFlag::InputDeterministic,
        wfst_speller::types::HeaderFlag::Minimized,
        wfst_speller::types::HeaderFlag::Cyclic,
        wfst_speller::types::HeaderFlag::HasEpsilonEpsilonTransitions,
        wfst_speller::types::HeaderFlag::HasInputEpsilonTransitions,
        wfst_speller::types::HeaderFlag::HasInputEpsilonCycles,
        wfst_speller::types::HeaderFlag::HasUnweightedInputEpsilonCycles,
    ] {
        let word: u32 = if header.has_flag(flag) { 1 } else { 0 };
        reserialized.extend_from_slice(&word.to_le_bytes());
    }

    assert_eq!(reserialized, buf);
    assert_eq!(LittleEndian::read_u16(&reserialized), 3);
}
