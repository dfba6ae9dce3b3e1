//! Text primitives used by every backend: tokenization and sentence
//! splitting. Both are total functions over arbitrary input.

use std::collections::HashSet;

/// Extract maximal runs of Unicode letters, digits, and apostrophes of
/// length >= 2, lowercased. Everything else separates tokens and is
/// dropped, as are runs of a single character.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    let mut run_len = 0usize;
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            run.push(ch);
            run_len += 1;
        } else {
            if run_len >= 2 {
                tokens.push(run.to_lowercase());
            }
            run.clear();
            run_len = 0;
        }
    }
    if run_len >= 2 {
        tokens.push(run.to_lowercase());
    }
    tokens
}

/// The unique tokens of `text`, for overlap counting.
pub fn unique_tokens(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Number of distinct tokens shared between `text` and `query_tokens`.
pub fn token_overlap(text: &str, query_tokens: &HashSet<String>) -> usize {
    unique_tokens(text)
        .iter()
        .filter(|t| query_tokens.contains(*t))
        .count()
}

/// Split `text` into sentences at whitespace that immediately follows a
/// sentence-terminal mark (`.`, `!`, `?`). Sentences keep their terminal
/// mark and are trimmed; empty spans are dropped. Text without terminal
/// punctuation comes back as a single trimmed sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.trim().chars().peekable();
    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && chars.peek().is_some_and(|c| c.is_whitespace()) {
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
