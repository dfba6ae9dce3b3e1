use crate::types::EngineKind;

/// A ranking backend built from the full corpus on every rebuild.
///
/// `score` is total: it returns one score per corpus document, in corpus
/// order, and never fails. Unknown or empty queries score 0 everywhere.
pub trait RankingBackend: Send + Sync {
    fn kind(&self) -> EngineKind;
    fn score(&self, query: &str) -> Vec<f32>;
}
