//! Sentence-level evidence for a query.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::query::QueryTerms;

static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

/// Splits `text` into sentences and returns those mentioning at least one query
/// term, best first. Ties keep document order. Sentences whose trimmed length
/// is at most `min_len` characters are discarded.
pub fn select_snippets(text: &str, query: &QueryTerms, min_len: usize) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > min_len)
        .filter_map(|sentence| {
            let score = query.count_in(&sentence.to_lowercase());
            (score > 0).then_some((score, sentence))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, s)| s.to_string()).collect()
}
