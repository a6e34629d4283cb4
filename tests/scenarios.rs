//! Scenarios S1-S5 and S7 from spec section 8, against a small hand-built lexicon
//! (accepting "cat" and "cet", both final weight 1.0) and error model (identity on
//! c/a/t, plus substitutions o->a at 2.0 and o->e at 3.5).

mod support;

use support::{build_transducer, IndexRow as I, TransitionRow as T};
use wfst_speller::{Speller, SpellerConfig};

const EPS: u16 = 0;
const C: u16 = 1;
const A: u16 = 2;
const TEE: u16 = 3;
const E: u16 = 4;
const O: u16 = 5;

fn lexicon() -> wfst_speller::transducer::hfst::HfstTransducer {
    // States: 0 start, 1 after "c", 2 after "ca", 3 final "cat", 4 after "ce", 5 final "cet".
    // Block size = symbol_count (5: eps,c,a,t,e) + 1 = 6.
    let symbols = ["", "c", "a", "t", "e"];

    let transitions = [
        T::new(C, C, 1, 0.0),   // row0: state0 -c-> state1
        T::new(A, A, 2, 0.0),   // row1: state1 -a-> state2
        T::new(E, E, 4, 0.0),   // row2: state1 -e-> state4
        T::new(TEE, TEE, 3, 0.0), // row3: state2 -t-> state3 (final)
        T::new(TEE, TEE, 5, 0.0), // row4: state4 -t-> state5 (final)
    ];

    let mut index = Vec::new();
    // state0 (base 0)
    index.push(I::none()); // final marker: not final
    index.push(I::none()); // eps
    index.push(I::edge(C, 0)); // c -> row0
    index.push(I::none()); // a
    index.push(I::none()); // t
    index.push(I::none()); // e
    // state1 (base 6)
    index.push(I::none());
    index.push(I::none());
    index.push(I::none()); // c
    index.push(I::edge(A, 1)); // a -> row1
    index.push(I::none()); // t
    index.push(I::edge(E, 2)); // e -> row2
    // state2 (base 12)
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::edge(TEE, 3)); // t -> row3
    index.push(I::none());
    // state3 (base 18), final weight 1.0
    index.push(I::final_marker(1.0));
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    // state4 (base 24)
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::edge(TEE, 4)); // t -> row4
    index.push(I::none());
    // state5 (base 30), final weight 1.0
    index.push(I::final_marker(1.0));
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());
    index.push(I::none());

    build_transducer(&symbols, &index, &transitions)
}

fn mutator() -> wfst_speller::transducer::hfst::HfstTransducer {
    // Single final state 0, self-looping on every transition.
    // Block size = symbol_count (6: eps,c,a,t,e,o) + 1 = 7.
    let symbols = ["", "c", "a", "t", "e", "o"];

    let transitions = [
        T::new(C, C, 0, 0.0),   // row0
        T::new(A, A, 0, 0.0),   // row1
        T::new(TEE, TEE, 0, 0.0), // row2
        T::new(O, A, 0, 2.0),   // row3: o -> a, weight 2.0
        T::new(O, E, 0, 3.5),   // row4: o -> e, weight 3.5
    ];

    let index = vec![
        I::final_marker(0.0), // state0 is final, weight 0
        I::none(),            // eps
        I::edge(C, 0),        // c -> row0
        I::edge(A, 1),        // a -> row1
        I::edge(TEE, 2),      // t -> row2
        I::none(),            // e (never used as mutator input)
        I::edge(O, 3),        // o -> row3 (then row4 for the same symbol)
    ];

    build_transducer(&symbols, &index, &transitions)
}

fn speller() -> std::sync::Arc<Speller<wfst_speller::transducer::hfst::HfstTransducer, wfst_speller::transducer::hfst::HfstTransducer>> {
    Speller::new(mutator(), lexicon())
}

#[test]
fn s1_exact_match() {
    let speller = speller();
    assert!(speller.is_correct("cat"));

    let suggestions = speller.suggest("cat");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].value(), "cat");
    assert_eq!(suggestions[0].weight(), 1.0);
}

#[test]
fn s2_single_substitution() {
    let speller = speller();
    assert!(!speller.is_correct("cot"));

    let suggestions = speller.suggest("cot");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].value(), "cat");
    assert_eq!(suggestions[0].weight(), 3.0);
}

#[test]
fn s3_nbest_cap() {
    let speller = speller();

    let mut cfg = SpellerConfig::default();
    cfg.n_best = Some(1);
    let top1 = speller.suggest_with_config("cot", &cfg);
    assert_eq!(top1.len(), 1);
    assert_eq!(top1[0].value(), "cat");
    assert_eq!(top1[0].weight(), 3.0);

    cfg.n_best = Some(2);
    let top2 = speller.suggest_with_config("cot", &cfg);
    assert_eq!(top2.len(), 2);
    assert_eq!(top2[0].value(), "cat");
    assert_eq!(top2[0].weight(), 3.0);
    assert_eq!(top2[1].value(), "cet");
    assert_eq!(top2[1].weight(), 4.5);
}

#[test]
fn s4_beam() {
    let speller = speller();
    let mut cfg = SpellerConfig::default();
    cfg.beam = Some(1.0);
    let suggestions = speller.suggest_with_config("cot", &cfg);
    // Best is "cat" at 3.0; "cet" at 4.5 is >= 3.0 + 1.0 and must be dropped.
    assert!(suggestions.iter().all(|s| s.weight() < 4.0));
    assert!(suggestions.iter().any(|s| s.value() == "cat"));
    assert!(!suggestions.iter().any(|s| s.value() == "cet"));
}

#[test]
fn s5_max_weight() {
    let speller = speller();
    let mut cfg = SpellerConfig::default();
    cfg.max_weight = Some(2.9);
    let suggestions = speller.suggest_with_config("cot", &cfg);
    assert!(suggestions.is_empty());
}

#[test]
fn s7_other_fallback_does_not_panic() {
    let speller = speller();
    assert!(!speller.is_correct("c\u{e7}t")); // "çt"... contains a code point absent from the alphabet
}
