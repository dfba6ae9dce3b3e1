//! Domain types shared by the ranking backends and the engine.

use serde::{Deserialize, Serialize};

/// A document held by the engine's corpus.
///
/// - `id`: caller-supplied identity, or `doc_<n>` (1-based insertion
///   position) when absent. Duplicate ids are accepted as-is.
/// - `text`: the indexed payload
/// - `source`: free-form provenance label, empty when unknown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub source: String,
}

/// A candidate entry for `add_documents`. Entries without `text` are
/// skipped; `id` and `source` fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl DocumentInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }
}

/// Indicates which ranking backend produced a result set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Tfidf,
    Bm25,
}

/// Counts reported by `add_documents`. `added` is the number of accepted
/// entries from this call, `total` the corpus size afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: usize,
    pub total: usize,
}

/// One ranked search result. `score` is backend-specific but higher is
/// always better; `excerpt` quotes the most query-relevant sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: String,
    pub source: String,
    pub score: f32,
    pub excerpt: String,
}

/// The full response of a search. `engine` is absent exactly when the
/// corpus is empty and no backend is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineKind>,
    pub results: Vec<RankedResult>,
}

/// The outcome of `semantic_compress`: the kept sentences in selection
/// order and their single-space join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressOutcome {
    pub compressed: String,
    pub sentences: Vec<String>,
    pub max_sentences: usize,
}
