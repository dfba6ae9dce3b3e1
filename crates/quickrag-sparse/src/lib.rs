//! quickrag-sparse
//!
//! Okapi BM25 ranking backend. Built in full from the corpus on every
//! rebuild: per-document term frequencies, per-term inverse document
//! frequency, and the average document length for length normalization.
//! This is the fallback backend when the dense vectorizer declines.

use std::collections::{HashMap, HashSet};

use quickrag_core::text::tokenize;
use quickrag_core::traits::RankingBackend;
use quickrag_core::types::EngineKind;
use tracing::debug;

/// Term-frequency saturation.
pub const K1: f32 = 1.5;
/// Document-length normalization strength.
pub const B: f32 = 0.75;

const EPS: f32 = 1e-9;

/// BM25 index over the full corpus, one entry per document in corpus
/// order.
pub struct Bm25Index {
    doc_tfs: Vec<HashMap<String, f32>>,
    doc_lens: Vec<f32>,
    idf: HashMap<String, f32>,
    avgdl: f32,
}

impl Bm25Index {
    /// Tokenize every document and derive document frequencies,
    /// `idf(t) = ln(1 + (N - df + 0.5) / (df + 0.5))`, and the average
    /// document token count. Never fails; an empty slice yields an index
    /// that scores nothing.
    pub fn build(texts: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
        let n = tokenized.len().max(1) as f32;

        let mut df: HashMap<&str, f32> = HashMap::new();
        for doc in &tokenized {
            let distinct: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in distinct {
                *df.entry(term).or_insert(0.0) += 1.0;
            }
        }
        let idf: HashMap<String, f32> = df
            .into_iter()
            .map(|(term, f)| (term.to_string(), (1.0 + (n - f + 0.5) / (f + 0.5)).ln()))
            .collect();

        let total_len: usize = tokenized.iter().map(Vec::len).sum();
        let avgdl = total_len as f32 / tokenized.len().max(1) as f32;

        let mut doc_tfs = Vec::with_capacity(tokenized.len());
        let mut doc_lens = Vec::with_capacity(tokenized.len());
        for doc in &tokenized {
            let mut tf: HashMap<String, f32> = HashMap::new();
            for term in doc {
                *tf.entry(term.clone()).or_insert(0.0) += 1.0;
            }
            doc_tfs.push(tf);
            doc_lens.push(doc.len() as f32);
        }

        debug!(
            docs = tokenized.len(),
            vocabulary = idf.len(),
            avgdl,
            "built bm25 index"
        );
        Bm25Index { doc_tfs, doc_lens, idf, avgdl }
    }

    pub fn len(&self) -> usize {
        self.doc_tfs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_tfs.is_empty()
    }
}

impl RankingBackend for Bm25Index {
    fn kind(&self) -> EngineKind {
        EngineKind::Bm25
    }

    /// Score every document against `query`, in corpus order. Query terms
    /// are summed as tokenized (repeated terms contribute repeatedly);
    /// terms absent from a document contribute 0, as do terms unseen at
    /// build time.
    fn score(&self, query: &str) -> Vec<f32> {
        let q_terms = tokenize(query);
        let avgdl = if self.avgdl > 0.0 { self.avgdl } else { 1.0 };
        self.doc_tfs
            .iter()
            .zip(&self.doc_lens)
            .map(|(tf, &len)| {
                let dl = if len > 0.0 { len } else { 1.0 };
                let mut score = 0.0;
                for term in &q_terms {
                    let Some(&f) = tf.get(term) else { continue };
                    let idf = self.idf.get(term).copied().unwrap_or(0.0);
                    let denom = f + K1 * (1.0 - B + B * (dl / avgdl));
                    score += idf * (f * (K1 + 1.0)) / (denom + EPS);
                }
                score
            })
            .collect()
    }
}
