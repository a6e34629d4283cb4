//! Case-folded word variants for spell-checking (`SPEC_FULL.md` section C.4): the
//! original's `main-ispell`/`main-norvig` front ends re-query an all-caps or
//! title-case word in lower case and re-apply the original casing to whatever comes
//! back, rather than teaching the lexicon every casing of every word.

use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;

fn is_cased_letter(ch: char) -> bool {
    use GeneralCategory::*;
    matches!(GeneralCategory::of(ch), UppercaseLetter | LowercaseLetter | TitlecaseLetter)
}

/// True when the word has at least one cased letter and every cased letter is
/// uppercase.
pub fn is_all_caps(word: &str) -> bool {
    let mut any_cased = false;
    for ch in word.chars() {
        if !is_cased_letter(ch) {
            continue;
        }
        any_cased = true;
        if !ch.is_uppercase() {
            return false;
        }
    }
    any_cased
}

/// True when the first cased letter is uppercase and the word is not entirely
/// uppercase (so `is_all_caps` and `is_first_caps` are mutually exclusive for words
/// with more than one cased letter).
pub fn is_first_caps(word: &str) -> bool {
    let mut chars = word.chars();
    let first = match chars.find(|ch| is_cased_letter(*ch)) {
        Some(ch) => ch,
        None => return false,
    };
    first.is_uppercase() && !is_all_caps(word)
}

pub fn upper_case(word: &str) -> SmolStr {
    SmolStr::new(word.to_uppercase())
}

pub fn upper_first(word: &str) -> SmolStr {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    out.push_str(chars.as_str());
    SmolStr::new(out)
}

/// The set of spellings to actually query the lexicon with: the word as given, plus a
/// lower-cased fallback when the word is all-caps or title-case and every character of
/// the fallback has some chance of being known to the lexicon (cheap sanity check
/// against `key_table`, not a guarantee).
pub fn word_variants(key_table: &[SmolStr], word: &str) -> Vec<SmolStr> {
    let mut variants = vec![SmolStr::new(word)];

    if is_all_caps(word) || is_first_caps(word) {
        let lowered = word.to_lowercase();
        if lowered != word && lowered.chars().any(|ch| key_table.iter().any(|k| k.as_str() == ch.to_string())) {
            variants.push(SmolStr::new(lowered));
        }
    }

    variants
}
