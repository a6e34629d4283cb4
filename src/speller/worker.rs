//! C6: the synchronous two-transducer search core (spec section 4.6).
//!
//! One `SpellerWorker` is built fresh per query (`Speller::is_correct`/`suggest_with_config`/
//! `analyse` each construct one), so the frontier, flag-state snapshots, and pruning
//! trackers below live entirely on the stack of a single call and need no locking.

use hashbrown::HashMap;
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Instant;

use crate::constants::NO_SYMBOL;
use crate::speller::suggestion::Suggestion;
use crate::speller::{Speller, SpellerConfig};
use crate::transducer::flag;
use crate::transducer::tree_node::TreeNode;
use crate::transducer::Transducer;
use crate::types::{SymbolNumber, Weight};

pub struct SpellerWorker<T: Transducer, U: Transducer> {
    speller: Arc<Speller<T, U>>,
    input: Vec<SymbolNumber>,
    config: SpellerConfig,
}

/// Max-heap ordering over weights, used to track the current worst of the top-n best
/// results found so far (spec section 4.6.5, nbest pruning).
#[derive(PartialEq)]
struct HeapWeight(Weight);

impl Eq for HeapWeight {}

impl PartialOrd for HeapWeight {
    fn partial_cmp(&self, other: &HeapWeight) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapWeight {
    fn cmp(&self, other: &HeapWeight) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

/// Tracks the pruning state shared across one search (spec section 4.6.5).
struct Pruning {
    nbest: Option<usize>,
    max_weight: Option<Weight>,
    beam: Option<Weight>,
    deadline: Option<Instant>,
    nbest_heap: BinaryHeap<HeapWeight>,
    best_final_weight: Weight,
}

impl Pruning {
    fn new(config: &SpellerConfig, started: Instant) -> Pruning {
        Pruning {
            nbest: config.n_best,
            max_weight: config.max_weight,
            beam: config.beam,
            deadline: config.time_cutoff_s.map(|s| started + std::time::Duration::from_secs_f32(s)),
            nbest_heap: BinaryHeap::new(),
            best_final_weight: std::f32::INFINITY,
        }
    }

    fn timed_out(&self) -> bool {
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }

    /// Whether a node with this weight should be dropped without expansion, per the
    /// four independent limits of spec section 4.6.5.
    fn should_prune(&self, weight: Weight) -> bool {
        if let Some(n) = self.nbest {
            if n > 0 && self.nbest_heap.len() >= n {
                if let Some(HeapWeight(worst)) = self.nbest_heap.peek() {
                    if weight >= *worst {
                        return true;
                    }
                }
            }
        }
        if let Some(w_max) = self.max_weight {
            if weight >= w_max {
                return true;
            }
        }
        if let Some(b) = self.beam {
            if weight >= self.best_final_weight + b {
                return true;
            }
        }
        false
    }

    /// Records a newly accepted final result, updating the beam baseline and the nbest
    /// tracking heap.
    fn record_final(&mut self, weight: Weight) {
        if weight < self.best_final_weight {
            self.best_final_weight = weight;
        }
        if let Some(n) = self.nbest {
            if n > 0 {
                self.nbest_heap.push(HeapWeight(weight));
                if self.nbest_heap.len() > n {
                    self.nbest_heap.pop();
                }
            }
        }
    }
}

impl<T: Transducer, U: Transducer> SpellerWorker<T, U> {
    pub fn new(speller: Arc<Speller<T, U>>, input: Vec<SymbolNumber>, config: SpellerConfig) -> SpellerWorker<T, U> {
        SpellerWorker { speller, input, config }
    }

    fn flag_state_size(&self) -> usize {
        self.speller.lexicon().alphabet().flag_state_size() as usize
    }

    /// `check(w)`: exhaustive lexicon-only search (spec section 4.6.4, no mutator).
    pub fn is_correct(&self) -> bool {
        let mut queue = vec![TreeNode::start(self.flag_state_size())];

        while let Some(node) = queue.pop() {
            if node.input_pos() == self.input.len() && self.speller.lexicon().is_final(node.lexicon_state()) {
                return true;
            }
            self.lexicon_epsilons(&node, &mut queue);
            self.lexicon_consume(&node, &mut queue);
        }

        false
    }

    /// `correct(w)` / `suggest`: mutator-driven search with pruning (spec sections
    /// 4.6.4-4.6.6).
    pub fn suggest(&self) -> Vec<Suggestion> {
        let started = Instant::now();
        let mut pruning = Pruning::new(&self.config, started);
        let mut corrections: HashMap<SmolStr, Weight> = HashMap::new();
        let mut queue = vec![TreeNode::start(self.flag_state_size())];

        while let Some(node) = queue.pop() {
            if pruning.timed_out() {
                break;
            }
            if pruning.should_prune(node.weight()) {
                continue;
            }

            self.lexicon_epsilons(&node, &mut queue);
            self.mutator_epsilons(&node, &mut queue);

            if node.input_pos() == self.input.len() {
                let mutator = self.speller.mutator();
                let lexicon = self.speller.lexicon();
                if mutator.is_final(node.mutator_state()) && lexicon.is_final(node.lexicon_state()) {
                    let weight = node.weight()
                        + lexicon.final_weight(node.lexicon_state()).unwrap_or(0.0)
                        + mutator.final_weight(node.mutator_state()).unwrap_or(0.0);
                    if !pruning.should_prune(weight) {
                        let string = node.stringify(lexicon.alphabet().key_table());
                        let better = corrections.get(&string).map_or(true, |&existing| weight < existing);
                        if better {
                            corrections.insert(string, weight);
                            pruning.record_final(weight);
                        }
                    }
                }
            } else {
                self.consume_input(&node, &mut queue);
            }
        }

        let mut out: Vec<Suggestion> = corrections.into_iter().map(|(value, weight)| Suggestion::new(value, weight)).collect();
        out.sort();
        if let Some(n) = self.config.n_best {
            out.truncate(n);
        }
        out
    }

    /// `analyse(w)`: single-transducer (lexicon only) search, with the same pruning as
    /// `suggest` (spec section 4.6.5: "Pruning applies only during correct / analyse").
    pub fn analyse(&self) -> Vec<Suggestion> {
        let started = Instant::now();
        let mut pruning = Pruning::new(&self.config, started);
        let mut outputs: HashMap<SmolStr, Weight> = HashMap::new();
        let mut queue = vec![TreeNode::start(self.flag_state_size())];

        while let Some(node) = queue.pop() {
            if pruning.timed_out() {
                break;
            }
            if pruning.should_prune(node.weight()) {
                continue;
            }

            let lexicon = self.speller.lexicon();
            if node.input_pos() == self.input.len() && lexicon.is_final(node.lexicon_state()) {
                let weight = node.weight() + lexicon.final_weight(node.lexicon_state()).unwrap_or(0.0);
                if !pruning.should_prune(weight) {
                    let string = node.stringify(lexicon.alphabet().key_table());
                    let better = outputs.get(&string).map_or(true, |&existing| weight < existing);
                    if better {
                        outputs.insert(string, weight);
                        pruning.record_final(weight);
                    }
                }
            }

            self.lexicon_epsilons(&node, &mut queue);
            self.lexicon_consume(&node, &mut queue);
        }

        let mut out: Vec<Suggestion> = outputs.into_iter().map(|(value, weight)| Suggestion::new(value, weight)).collect();
        out.sort();
        if let Some(n) = self.config.n_best {
            out.truncate(n);
        }
        out
    }

    /// While the lexicon has a pending epsilon-or-flag transition at
    /// `lexicon_state + 1`: advance on plain epsilons unconditionally, advance on flags
    /// only when the diacritic operation succeeds against a scratch copy of the node's
    /// flags (spec section 4.6.3 #1).
    fn lexicon_epsilons(&self, n: &TreeNode, queue: &mut Vec<TreeNode>) {
        let lexicon = self.speller.lexicon();
        if !lexicon.has_epsilons_or_flags(n.lexicon_state() + 1) {
            return;
        }
        let mut next = match lexicon.next(n.lexicon_state(), 0) {
            Some(v) => v,
            None => return,
        };

        loop {
            let trans = match lexicon.take_epsilons_and_flags(next) {
                Some(t) => t,
                None => break,
            };
            let sym = match lexicon.transition_input_symbol(next) {
                Some(s) => s,
                None => break,
            };

            if sym == 0 {
                // Push epsilon, not the transition's real output symbol: we want the
                // surface tape for correcting (matches the original's lexicon_epsilons).
                queue.push(n.update_lexicon(0, trans.target, trans.weight));
            } else {
                let op = lexicon.alphabet().operations().get(&sym).expect("flag symbol carries an operation");
                let mut flags = n.flags().clone();
                if flag::apply(&mut flags, op) {
                    queue.push(n.update_lexicon(0, trans.target, trans.weight).with_flags(flags));
                }
            }
            next += 1;
        }
    }

    /// Lexicon-only input consumption, used by `check`/`analyse` where there is no
    /// mutator to drive the traversal (spec section 4.6.3, `lexicon_consume`).
    fn lexicon_consume(&self, n: &TreeNode, queue: &mut Vec<TreeNode>) {
        let pos = n.input_pos();
        if pos >= self.input.len() {
            return;
        }
        let symbol = self.input[pos];
        let lexicon = self.speller.lexicon();
        if !lexicon.has_transitions(n.lexicon_state() + 1, Some(symbol)) {
            return;
        }
        let mut next = match lexicon.next(n.lexicon_state(), symbol) {
            Some(v) => v,
            None => return,
        };

        loop {
            let trans = match lexicon.take_non_epsilons(next, symbol) {
                Some(t) => t,
                None => break,
            };
            queue.push(n.update_both(trans.output_symbol, pos + 1, n.mutator_state(), trans.target, trans.weight));
            next += 1;
        }
    }

    /// For every mutator epsilon transition at `mutator_state + 1`: deletions
    /// (output `0`) advance only the mutator; other outputs are translated into
    /// lexicon-space and matched against the lexicon's non-epsilon transitions (spec
    /// section 4.6.3 #2).
    fn mutator_epsilons(&self, n: &TreeNode, queue: &mut Vec<TreeNode>) {
        let mutator = self.speller.mutator();
        let lexicon = self.speller.lexicon();
        let translator = self.speller.alphabet_translator();

        if !mutator.has_transitions(n.mutator_state() + 1, Some(0)) {
            return;
        }
        let mut next_m = match mutator.next(n.mutator_state(), 0) {
            Some(v) => v,
            None => return,
        };

        loop {
            let trans_m = match mutator.take_epsilons(next_m) {
                Some(t) => t,
                None => break,
            };

            if trans_m.output_symbol == 0 {
                queue.push(n.update_mutator(0, trans_m.target, trans_m.weight));
            } else {
                let translated = translator.get(trans_m.output_symbol as usize).copied().unwrap_or(NO_SYMBOL);
                if translated != NO_SYMBOL && lexicon.has_transitions(n.lexicon_state() + 1, Some(translated)) {
                    if let Some(mut next_l) = lexicon.next(n.lexicon_state(), translated) {
                        loop {
                            let trans_l = match lexicon.take_non_epsilons(next_l, translated) {
                                Some(t) => t,
                                None => break,
                            };
                            queue.push(n.update_both_same_input(translated, trans_m.target, trans_l.target, trans_l.weight + trans_m.weight));
                            next_l += 1;
                        }
                    }
                }
            }
            next_m += 1;
        }
    }

    /// Consumes one input symbol through the mutator, translating each surviving
    /// output into the lexicon as in `mutator_epsilons` (spec section 4.6.3 #3).
    fn consume_input(&self, n: &TreeNode, queue: &mut Vec<TreeNode>) {
        let pos = n.input_pos();
        if pos >= self.input.len() {
            return;
        }
        let symbol = self.input[pos];

        let mutator = self.speller.mutator();
        let lexicon = self.speller.lexicon();
        let translator = self.speller.alphabet_translator();

        if !mutator.has_transitions(n.mutator_state() + 1, Some(symbol)) {
            return;
        }
        let mut next_m = match mutator.next(n.mutator_state(), symbol) {
            Some(v) => v,
            None => return,
        };

        loop {
            let trans_m = match mutator.take_non_epsilons(next_m, symbol) {
                Some(t) => t,
                None => break,
            };

            if trans_m.output_symbol == 0 {
                queue.push(n.update_both(0, pos + 1, trans_m.target, n.lexicon_state(), trans_m.weight));
            } else {
                let translated = translator.get(trans_m.output_symbol as usize).copied().unwrap_or(NO_SYMBOL);
                if translated != NO_SYMBOL && lexicon.has_transitions(n.lexicon_state() + 1, Some(translated)) {
                    if let Some(mut next_l) = lexicon.next(n.lexicon_state(), translated) {
                        loop {
                            let trans_l = match lexicon.take_non_epsilons(next_l, translated) {
                                Some(t) => t,
                                None => break,
                            };
                            queue.push(n.update_both(translated, pos + 1, trans_m.target, trans_l.target, trans_l.weight + trans_m.weight));
                            next_l += 1;
                        }
                    }
                }
            }
            next_m += 1;
        }
    }
}
