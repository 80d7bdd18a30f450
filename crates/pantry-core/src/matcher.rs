//! Text matching primitives for ingredient ↔ purchase item lookup
//!
//! Matching is plain substring work, no tokenizer: an ingredient word "hits"
//! an item key when it appears anywhere inside the key ("pea" hits "peanut
//! butter"). Item keys are expected to be lowercase already, as produced by
//! the purchase history index.

use serde::{Deserialize, Serialize};

/// Lowercased whitespace-separated words of an ingredient name
pub fn words(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// First word of an ingredient name, lowercased
pub fn first_word(name: &str) -> Option<String> {
    name.to_lowercase().split_whitespace().next().map(str::to_string)
}

/// Count ingredient words of at least `min_word_len` characters found in `key`
///
/// Repeated words count once per occurrence in the ingredient name.
pub fn word_overlap_score(ingredient: &str, key: &str, min_word_len: usize) -> usize {
    words(ingredient)
        .iter()
        .filter(|w| w.chars().count() >= min_word_len && key.contains(w.as_str()))
        .count()
}

/// Whether the whole ingredient name, trimmed and lowercased, appears inside `key`
///
/// A blank name never matches.
pub fn contains_substring(ingredient: &str, key: &str) -> bool {
    let lower = ingredient.trim().to_lowercase();
    !lower.is_empty() && key.contains(lower.as_str())
}

/// Whether lowercase `text` contains any of `keywords`
pub fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && text.contains(k.to_lowercase().as_str()))
}

/// Word-overlap predicate as configured for one call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    /// Ingredient words shorter than this never count (0 = every word counts)
    pub min_word_len: usize,
    /// Also accept keys containing the full ingredient name
    pub exact_substring: bool,
}

impl MatchRule {
    pub const fn word_overlap(min_word_len: usize) -> Self {
        Self {
            min_word_len,
            exact_substring: false,
        }
    }

    pub const fn with_exact_substring(mut self) -> Self {
        self.exact_substring = true;
        self
    }

    /// Word overlap score > 0, or (when enabled) an exact substring hit
    pub fn matches(&self, ingredient: &str, key: &str) -> bool {
        word_overlap_score(ingredient, key, self.min_word_len) > 0
            || (self.exact_substring && contains_substring(ingredient, key))
    }
}

impl Default for MatchRule {
    fn default() -> Self {
        Self::word_overlap(3)
    }
}
