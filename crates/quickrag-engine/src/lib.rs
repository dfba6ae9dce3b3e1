//! quickrag-engine
//!
//! The retrieval engine: an append-only document store, a ranking backend
//! rebuilt from the full corpus on every mutation, and the search path
//! that ranks, truncates, and attaches evidence excerpts.
//!
//! Backend selection is a capability probe run on every rebuild: the dense
//! tf-idf fit is attempted first and BM25 is built when it declines. No
//! engine operation fails; empty corpora, empty queries, and unknown terms
//! are all defined outcomes.

pub mod compress;
pub mod excerpt;

pub use compress::{semantic_compress, DEFAULT_MAX_SENTENCES};
pub use excerpt::{best_excerpt, DEFAULT_MAX_CHARS};

use std::sync::{PoisonError, RwLock};

use anyhow::Result;
use quickrag_core::traits::RankingBackend;
use quickrag_core::types::{
    AddOutcome, CompressOutcome, Document, DocumentInput, RankedResult, SearchResponse,
};
use quickrag_dense::TfidfIndex;
use quickrag_sparse::Bm25Index;
use tracing::debug;

pub const DEFAULT_TOP_K: usize = 5;

/// The capability probe for the dense backend, re-run on every rebuild.
/// Returning an error never reaches the caller; the engine falls back to
/// BM25.
pub type DenseFitter = fn(&[String]) -> Result<Box<dyn RankingBackend>>;

/// Default probe: fit the tf-idf index over the corpus.
pub fn tfidf_fitter(texts: &[String]) -> Result<Box<dyn RankingBackend>> {
    Ok(Box::new(TfidfIndex::fit(texts)?))
}

#[derive(Default)]
struct EngineState {
    docs: Vec<Document>,
    backend: Option<Box<dyn RankingBackend>>,
}

/// The engine instance. Mutation and reads are serialized through one
/// reader/writer section so a rebuild swaps the backend atomically;
/// concurrent searches against a stable index proceed in parallel.
pub struct RagEngine {
    state: RwLock<EngineState>,
    dense_fitter: DenseFitter,
}

impl RagEngine {
    pub fn new() -> Self {
        Self::with_dense_fitter(tfidf_fitter)
    }

    /// Build an engine with a different dense capability probe, e.g. one
    /// that always declines so every rebuild lands on BM25.
    pub fn with_dense_fitter(dense_fitter: DenseFitter) -> Self {
        Self { state: RwLock::new(EngineState::default()), dense_fitter }
    }

    /// Append accepted entries to the corpus and rebuild the index before
    /// returning. Entries without `text` are skipped; missing ids default
    /// to `doc_<n>` by 1-based insertion position, missing sources to the
    /// empty string. Never fails, including for an empty batch (which
    /// still rebuilds).
    pub fn add_documents(&self, entries: Vec<DocumentInput>) -> AddOutcome {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut added = 0;
        for entry in entries {
            let Some(text) = entry.text else { continue };
            let id = entry
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("doc_{}", state.docs.len() + 1));
            let source = entry.source.unwrap_or_default();
            state.docs.push(Document { id, text, source });
            added += 1;
        }
        Self::rebuild(&mut state, self.dense_fitter);
        AddOutcome { added, total: state.docs.len() }
    }

    fn rebuild(state: &mut EngineState, dense_fitter: DenseFitter) {
        if state.docs.is_empty() {
            state.backend = None;
            return;
        }
        let texts: Vec<String> = state.docs.iter().map(|d| d.text.clone()).collect();
        let backend: Box<dyn RankingBackend> = match dense_fitter(&texts) {
            Ok(backend) => backend,
            Err(err) => {
                debug!(error = %err, "dense vectorizer unavailable, building bm25");
                Box::new(Bm25Index::build(&texts))
            }
        };
        debug!(total = state.docs.len(), engine = ?backend.kind(), "rebuilt index");
        state.backend = Some(backend);
    }

    /// Rank the corpus against `query` and keep the `top_k` best. Ties
    /// keep insertion order; `top_k` of zero yields no results. The
    /// `engine` tag is absent exactly when the corpus is empty.
    pub fn search(&self, query: &str, top_k: usize) -> SearchResponse {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let Some(backend) = state.backend.as_ref() else {
            return SearchResponse { query: query.to_string(), engine: None, results: Vec::new() };
        };

        let scores = backend.score(query);
        let mut order: Vec<usize> = (0..state.docs.len()).collect();
        // Stable sort: equal scores stay in insertion order.
        order.sort_by(|&a, &b| {
            scores[b].partial_cmp(&scores[a]).unwrap_or(std::cmp::Ordering::Equal)
        });
        order.truncate(top_k);

        let results: Vec<RankedResult> = order
            .into_iter()
            .map(|i| {
                let doc = &state.docs[i];
                RankedResult {
                    id: doc.id.clone(),
                    source: doc.source.clone(),
                    score: scores[i],
                    excerpt: excerpt::best_excerpt(&doc.text, query, excerpt::DEFAULT_MAX_CHARS),
                }
            })
            .collect();

        SearchResponse {
            query: query.to_string(),
            engine: Some(backend.kind()),
            results,
        }
    }

    /// Stateless compression of caller-supplied text; exposed on the
    /// engine for interface parity with `search`.
    pub fn semantic_compress(
        &self,
        text: &str,
        query: &str,
        max_sentences: usize,
    ) -> CompressOutcome {
        compress::semantic_compress(text, query, max_sentences)
    }

    /// Current corpus size.
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .docs
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RagEngine {
    fn default() -> Self {
        Self::new()
    }
}
