//! Query-guided compression: keep the sentences of a text most relevant
//! to a query, as a cheap extractive summary.

use quickrag_core::text::{split_sentences, token_overlap, unique_tokens};
use quickrag_core::types::CompressOutcome;

pub const DEFAULT_MAX_SENTENCES: usize = 5;

/// Select up to `max_sentences` sentences of `text` by token overlap with
/// `query` (ties broken toward longer sentences, stable beyond that). When
/// nothing overlaps, the leading sentences stand in so the result is never
/// silently empty for non-empty input.
pub fn semantic_compress(text: &str, query: &str, max_sentences: usize) -> CompressOutcome {
    let query_tokens = unique_tokens(query);
    let sentences = split_sentences(text);

    let mut scored: Vec<(usize, usize, &String)> = sentences
        .iter()
        .map(|s| (token_overlap(s, &query_tokens), s.chars().count(), s))
        .collect();
    // Stable two-key sort: overlap desc, then character length desc.
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let kept: Vec<String> = scored
        .iter()
        .take(max_sentences)
        .filter(|(overlap, _, _)| *overlap > 0)
        .map(|(_, _, s)| (*s).clone())
        .collect();
    let kept = if kept.is_empty() {
        sentences.into_iter().take(max_sentences).collect()
    } else {
        kept
    };

    let compressed = kept.join(" ");
    CompressOutcome { compressed, sentences: kept, max_sentences }
}
