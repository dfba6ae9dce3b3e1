//! quickrag-dense
//!
//! TF-IDF vectorizer and the dense ranking backend built on it. Fitting is
//! the engine's capability probe: it fails when the stop-word-filtered
//! corpus yields no vocabulary, and the engine then falls back to BM25.
//! Scoring is a brute-force inner product over l2-normalized rows, which
//! is fine for the small ad-hoc corpora this engine serves.

mod stopwords;

pub use stopwords::is_stop_word;

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{bail, Result};
use quickrag_core::text::tokenize;
use quickrag_core::traits::RankingBackend;
use quickrag_core::types::EngineKind;
use tracing::debug;

/// Tokenize for vectorization: the shared tokenizer minus English stop
/// words.
fn analyze(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .collect()
}

/// Vocabulary and smoothed idf weights fitted over a corpus. Produces
/// l2-normalized tf-idf vectors, so document/query inner products are
/// cosine similarities.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and idf over `texts`. Fails when no usable term
    /// survives tokenization and stop-word removal.
    pub fn fit(texts: &[String]) -> Result<Self> {
        let analyzed: Vec<Vec<String>> = texts.iter().map(|t| analyze(t)).collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &analyzed {
            let distinct: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in distinct {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            bail!("empty vocabulary: no terms survive tokenization and stop-word removal");
        }

        let n = texts.len() as f32;
        let mut vocabulary = HashMap::with_capacity(df.len());
        let mut idf = Vec::with_capacity(df.len());
        for (index, (term, count)) in df.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            idf.push(((1.0 + n) / (1.0 + count as f32)).ln() + 1.0);
        }
        Ok(Self { vocabulary, idf })
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Map `text` to its l2-normalized tf-idf vector. Terms outside the
    /// fitted vocabulary are ignored; a text with no known terms maps to
    /// the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for token in analyze(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += 1.0;
            }
        }
        for (index, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[index];
        }
        l2_normalize(&mut vector);
        vector
    }
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Dense ranking backend: one tf-idf row per corpus document.
pub struct TfidfIndex {
    vectorizer: TfidfVectorizer,
    rows: Vec<Vec<f32>>,
}

impl TfidfIndex {
    pub fn fit(texts: &[String]) -> Result<Self> {
        let vectorizer = TfidfVectorizer::fit(texts)?;
        let rows = texts.iter().map(|t| vectorizer.transform(t)).collect();
        debug!(
            docs = texts.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "built tf-idf index"
        );
        Ok(Self { vectorizer, rows })
    }
}

impl RankingBackend for TfidfIndex {
    fn kind(&self) -> EngineKind {
        EngineKind::Tfidf
    }

    fn score(&self, query: &str) -> Vec<f32> {
        let query_vector = self.vectorizer.transform(query);
        self.rows.iter().map(|row| dot(row, &query_vector)).collect()
    }
}
