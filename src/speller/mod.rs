//! C7: the speller façade (spec section 4.7).

pub mod suggestion;
pub mod worker;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::sync::Arc;

use self::worker::SpellerWorker;
use crate::speller::suggestion::Suggestion;
use crate::tokenizer::case_handling;
use crate::transducer::encoder::tokenize;
use crate::transducer::Transducer;
use crate::types::{SymbolNumber, Weight};

/// Tuning knobs for `suggest`/`analyse` (spec section 6.3 `opts`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpellerConfig {
    pub n_best: Option<usize>,
    pub max_weight: Option<Weight>,
    pub beam: Option<Weight>,
    pub case_handling: bool,
    pub time_cutoff_s: Option<f32>,
}

impl SpellerConfig {
    pub fn default() -> SpellerConfig {
        SpellerConfig {
            n_best: None,
            max_weight: None,
            beam: None,
            case_handling: true,
            time_cutoff_s: None,
        }
    }
}

/// Owns the two transducers and the translator between their alphabets (spec section
/// 4.7, 5). Immutable after construction; `Arc`-shared so callers can spin up a
/// short-lived [`SpellerWorker`] per query without synchronizing on shared mutable
/// state.
#[derive(Debug)]
pub struct Speller<T: Transducer, U: Transducer> {
    mutator: T,
    lexicon: U,
    alphabet_translator: Vec<SymbolNumber>,
}

impl<T: Transducer, U: Transducer> Speller<T, U> {
    pub fn new(mutator: T, mut lexicon: U) -> Arc<Speller<T, U>> {
        let alphabet_translator = lexicon.mut_alphabet().create_translator_from(mutator.alphabet());

        Arc::new(Speller {
            mutator,
            lexicon,
            alphabet_translator,
        })
    }

    pub fn mutator(&self) -> &T {
        &self.mutator
    }

    pub fn lexicon(&self) -> &U {
        &self.lexicon
    }

    pub fn alphabet_translator(&self) -> &[SymbolNumber] {
        &self.alphabet_translator
    }

    /// `spell(s)` (spec section 4.7): tokenize against the lexicon's encoder with no
    /// "other" fallback, so any unrecognised character fails the check outright.
    pub fn is_correct(self: &Arc<Self>, word: &str) -> bool {
        let words = case_handling::word_variants(self.lexicon().alphabet().key_table(), word);

        words.iter().any(|w| match tokenize(self.lexicon().encoder(), w, None) {
            Some(input) => SpellerWorker::new(self.clone(), input, SpellerConfig::default()).is_correct(),
            None => false,
        })
    }

    pub fn suggest(self: &Arc<Self>, word: &str) -> Vec<Suggestion> {
        self.suggest_with_config(word, &SpellerConfig::default())
    }

    fn suggest_single(self: &Arc<Self>, word: &str, config: &SpellerConfig) -> Vec<Suggestion> {
        match tokenize(self.mutator().encoder(), word, self.mutator().alphabet().other_symbol()) {
            Some(input) => SpellerWorker::new(self.clone(), input, config.clone()).suggest(),
            None => vec![],
        }
    }

    fn suggest_caps_merging(self: &Arc<Self>, ref_word: &str, words: Vec<SmolStr>, config: &SpellerConfig) -> Vec<Suggestion> {
        use hashbrown::HashMap;

        let mut best: HashMap<SmolStr, Weight> = HashMap::new();

        for word in &words {
            let suggestions = self.suggest_single(word, config);
            if suggestions.is_empty() {
                continue;
            }
            let recased = recase_like(ref_word, suggestions);
            for sugg in recased {
                best.entry(sugg.value().into())
                    .and_modify(|w| {
                        if sugg.weight() < *w {
                            *w = sugg.weight();
                        }
                    })
                    .or_insert_with(|| sugg.weight());
            }
        }

        let mut out: Vec<Suggestion> = best.into_iter().map(|(value, weight)| Suggestion::new(value, weight)).collect();
        out.sort();
        if let Some(n) = config.n_best {
            out.truncate(n);
        }
        out
    }

    fn suggest_caps(self: &Arc<Self>, ref_word: &str, words: Vec<SmolStr>, config: &SpellerConfig) -> Vec<Suggestion> {
        for word in &words {
            let suggestions = self.suggest_single(word, config);
            if !suggestions.is_empty() {
                return recase_like(ref_word, suggestions);
            }
        }
        vec![]
    }

    /// `suggest(s, opts)` (spec section 4.7/6.3): when case handling is enabled,
    /// queries the lower-cased/title-cased variants of an all-caps or title-case word
    /// and re-applies the original casing to the results, matching the original's
    /// ispell/norvig front-end behaviour.
    pub fn suggest_with_config(self: &Arc<Self>, word: &str, config: &SpellerConfig) -> Vec<Suggestion> {
        if config.case_handling {
            let words = case_handling::word_variants(self.lexicon().alphabet().key_table(), word);
            if words.len() > 1 {
                self.suggest_caps_merging(word, words, config)
            } else {
                self.suggest_caps(word, words, config)
            }
        } else {
            self.suggest_single(word, config)
        }
    }

    /// `analyse(s, use_sugger)` (spec section 4.7): runs the lexicon-only search of
    /// [`SpellerWorker::analyse`]. This core has no separate "sugger" analyser wired
    /// in, so `use_sugger` is presently a no-op and the lexicon is always consulted.
    pub fn analyse(self: &Arc<Self>, word: &str, _use_sugger: bool) -> Vec<Suggestion> {
        self.analyse_with_config(word, &SpellerConfig::default())
    }

    pub fn analyse_with_config(self: &Arc<Self>, word: &str, config: &SpellerConfig) -> Vec<Suggestion> {
        match tokenize(self.lexicon().encoder(), word, self.lexicon().alphabet().other_symbol()) {
            Some(input) => SpellerWorker::new(self.clone(), input, config.clone()).analyse(),
            None => vec![],
        }
    }

    /// `suggest_analyses(s)` (spec section 4.7): the cartesian product of `suggest(s)`
    /// and `analyse(correction, true)`, weighted by the analysis's own weight.
    pub fn suggest_analyses(self: &Arc<Self>, word: &str, config: &SpellerConfig) -> Vec<(Suggestion, Suggestion)> {
        let mut out = Vec::new();
        for correction in self.suggest_with_config(word, config) {
            for analysis in self.analyse_with_config(correction.value(), config) {
                out.push((correction.clone(), analysis));
            }
        }
        out.sort_by(|a, b| a.1.cmp(&b.1));
        out
    }
}

fn recase_like(ref_word: &str, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    if case_handling::is_all_caps(ref_word) {
        suggestions.into_iter().map(|s| Suggestion::new(case_handling::upper_case(s.value()), s.weight())).collect()
    } else if case_handling::is_first_caps(ref_word) {
        suggestions.into_iter().map(|s| Suggestion::new(case_handling::upper_first(s.value()), s.weight())).collect()
    } else {
        suggestions
    }
}
