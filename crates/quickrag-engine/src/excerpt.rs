//! Picks the sentence of a document most worth quoting for a query.

use quickrag_core::text::{collapse_whitespace, split_sentences, token_overlap, unique_tokens};

pub const DEFAULT_MAX_CHARS: usize = 320;

/// The sentence of `text` sharing the most tokens with `query`, first-seen
/// winning ties. When no sentence overlaps the query at all (or the text
/// has no sentences), the whole trimmed text stands in. Whitespace runs
/// are collapsed; anything longer than `max_chars` is cut to
/// `max_chars - 1` characters plus an ellipsis.
pub fn best_excerpt(text: &str, query: &str, max_chars: usize) -> String {
    let query_tokens = unique_tokens(query);
    let sentences = split_sentences(text);

    let mut chosen: Option<&str> = None;
    let mut best_overlap = 0usize;
    for sentence in &sentences {
        let overlap = token_overlap(sentence, &query_tokens);
        if overlap > best_overlap {
            best_overlap = overlap;
            chosen = Some(sentence);
        }
    }

    let body = chosen.unwrap_or_else(|| text.trim());
    truncate_with_ellipsis(collapse_whitespace(body), max_chars)
}

fn truncate_with_ellipsis(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
