use std::sync::Arc;

use quickrag_core::traits::RankingBackend;
use quickrag_core::types::{DocumentInput, EngineKind};
use quickrag_engine::{best_excerpt, semantic_compress, RagEngine, DEFAULT_TOP_K};

fn doc(text: &str) -> DocumentInput {
    DocumentInput::from_text(text)
}

fn unavailable_fitter(_texts: &[String]) -> anyhow::Result<Box<dyn RankingBackend>> {
    anyhow::bail!("vectorizer unavailable")
}

#[test]
fn exact_query_document_ranks_first() {
    let engine = RagEngine::new();
    engine.add_documents(vec![
        doc("Dogs bark loudly at night."),
        doc("The cat sat on the mat."),
        doc("Rain fell over the harbor all evening."),
    ]);
    let response = engine.search("The cat sat on the mat.", DEFAULT_TOP_K);
    assert_eq!(response.results[0].id, "doc_2");
}

#[test]
fn two_document_scenario_ranks_and_scores() {
    let engine = RagEngine::new();
    let outcome = engine.add_documents(vec![
        doc("The cat sat on the mat."),
        doc("Dogs bark loudly at night."),
    ]);
    assert_eq!(outcome.added, 2);
    assert_eq!(outcome.total, 2);

    let response = engine.search("cat mat", 2);
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].id, "doc_1");
    assert!(response.results[0].score > 0.0);
    assert!(response.results[0].score > response.results[1].score);
    assert!(response.engine.is_some());
}

#[test]
fn empty_batch_keeps_total_and_backend() {
    let engine = RagEngine::new();
    engine.add_documents(vec![doc("cat mat"), doc("dog hat")]);
    let before = engine.search("cat", 5).engine;

    let outcome = engine.add_documents(vec![]);
    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.total, 2);
    assert_eq!(engine.search("cat", 5).engine, before);
}

#[test]
fn empty_corpus_search_returns_no_engine_and_no_results() {
    let engine = RagEngine::new();
    let response = engine.search("anything", 5);
    assert_eq!(response.query, "anything");
    assert!(response.engine.is_none());
    assert!(response.results.is_empty());
    assert!(engine.is_empty());
}

#[test]
fn entries_without_text_are_skipped_silently() {
    let engine = RagEngine::new();
    let outcome = engine.add_documents(vec![
        DocumentInput::default(),
        doc("real text"),
        DocumentInput { id: Some("orphan".to_string()), ..DocumentInput::default() },
    ]);
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.total, 1);
    assert_eq!(engine.len(), 1);
}

#[test]
fn missing_or_empty_ids_default_by_insertion_position() {
    let engine = RagEngine::new();
    engine.add_documents(vec![
        doc("alpha text"),
        DocumentInput { text: Some("bravo text".to_string()), id: Some(String::new()), ..DocumentInput::default() },
    ]);
    let response = engine.search("text", 5);
    let mut ids: Vec<&str> = response.results.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["doc_1", "doc_2"]);
}

#[test]
fn duplicate_ids_are_accepted_as_is() {
    let engine = RagEngine::new();
    engine.add_documents(vec![
        DocumentInput { text: Some("cat one".to_string()), id: Some("same".to_string()), ..DocumentInput::default() },
        DocumentInput { text: Some("cat two".to_string()), id: Some("same".to_string()), ..DocumentInput::default() },
    ]);
    let response = engine.search("cat", 5);
    assert_eq!(response.results.len(), 2);
    assert!(response.results.iter().all(|r| r.id == "same"));
}

#[test]
fn top_k_zero_yields_empty_results() {
    let engine = RagEngine::new();
    engine.add_documents(vec![doc("cat mat"), doc("dog hat")]);
    let response = engine.search("cat", 0);
    assert!(response.results.is_empty());
    assert!(response.engine.is_some(), "backend is still active");
}

#[test]
fn top_k_larger_than_corpus_returns_everything() {
    let engine = RagEngine::new();
    engine.add_documents(vec![doc("cat"), doc("dog"), doc("bird")]);
    assert_eq!(engine.search("cat", 100).results.len(), 3);
}

#[test]
fn unknown_query_under_bm25_preserves_insertion_order_with_zero_scores() {
    let engine = RagEngine::with_dense_fitter(unavailable_fitter);
    engine.add_documents(vec![doc("first text"), doc("second text"), doc("third text")]);

    let response = engine.search("nonexistent_term_zzz", 5);
    assert_eq!(response.engine, Some(EngineKind::Bm25));
    assert_eq!(response.results.len(), 3);
    let ids: Vec<&str> = response.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["doc_1", "doc_2", "doc_3"]);
    assert!(response.results.iter().all(|r| r.score == 0.0));
}

#[test]
fn dense_fit_failure_falls_back_to_bm25() {
    // Stop words and single characters only: the tf-idf fit declines.
    let engine = RagEngine::new();
    engine.add_documents(vec![doc("the and of"), doc("a b c the")]);
    let response = engine.search("the", 5);
    assert_eq!(response.engine, Some(EngineKind::Bm25));
}

#[test]
fn growing_the_corpus_reprobes_the_dense_capability() {
    let engine = RagEngine::new();
    engine.add_documents(vec![doc("the and of")]);
    assert_eq!(engine.search("the", 5).engine, Some(EngineKind::Bm25));

    engine.add_documents(vec![doc("real retrieval content")]);
    assert_eq!(engine.search("retrieval", 5).engine, Some(EngineKind::Tfidf));
}

#[test]
fn results_carry_query_relevant_excerpts() {
    let engine = RagEngine::new();
    engine.add_documents(vec![doc(
        "Alpha beta gamma. The cat sat on the mat. Another closing line.",
    )]);
    let response = engine.search("cat mat", 5);
    assert_eq!(response.results[0].excerpt, "The cat sat on the mat.");
}

#[test]
fn excerpt_prefers_highest_overlap_first_seen() {
    let excerpt = best_excerpt("cat alpha. cat beta. cat gamma.", "cat", 320);
    assert_eq!(excerpt, "cat alpha.");
}

#[test]
fn excerpt_with_no_overlap_is_full_collapsed_text() {
    let excerpt = best_excerpt("One  two. Three\n four.", "zzz unknown", 320);
    assert_eq!(excerpt, "One two. Three four.");
}

#[test]
fn excerpt_truncates_to_exact_budget_with_ellipsis() {
    let text = "word ".repeat(100);
    let excerpt = best_excerpt(&text, "word", 320);
    assert_eq!(excerpt.chars().count(), 320);
    assert!(excerpt.ends_with('…'));

    let short = best_excerpt("brief sentence.", "brief", 320);
    assert!(short.chars().count() <= 320);
    assert!(!short.ends_with('…'));
}

#[test]
fn compress_keeps_only_overlapping_sentences() {
    let outcome = semantic_compress("A. B. C cat.", "cat", 1);
    assert_eq!(outcome.sentences, vec!["C cat."]);
    assert_eq!(outcome.compressed, "C cat.");
    assert_eq!(outcome.max_sentences, 1);
}

#[test]
fn compress_caps_sentence_count_and_quotes_verbatim() {
    let text = "The cat sat. The cat ran. The cat slept. Dogs bark. Birds sing.";
    let outcome = semantic_compress(text, "cat", 2);
    assert!(outcome.sentences.len() <= 2);
    let originals = quickrag_core::text::split_sentences(text);
    for sentence in &outcome.sentences {
        assert!(originals.contains(sentence), "{sentence:?} must come from the split");
    }
}

#[test]
fn compress_breaks_overlap_ties_toward_longer_sentences() {
    let outcome = semantic_compress("cat ab. cat abcdef.", "cat", 2);
    assert_eq!(outcome.sentences, vec!["cat abcdef.", "cat ab."]);
}

#[test]
fn compress_with_no_overlap_falls_back_to_leading_sentences() {
    let outcome = semantic_compress("One. Two. Three.", "zzz", 2);
    assert_eq!(outcome.sentences, vec!["One.", "Two."]);
    assert_eq!(outcome.compressed, "One. Two.");
}

#[test]
fn compress_empty_text_is_empty() {
    let outcome = semantic_compress("", "cat", 3);
    assert!(outcome.sentences.is_empty());
    assert_eq!(outcome.compressed, "");
}

#[test]
fn engine_compress_matches_free_function() {
    let engine = RagEngine::new();
    let via_engine = engine.semantic_compress("A cat. A dog.", "cat", 1);
    let direct = semantic_compress("A cat. A dog.", "cat", 1);
    assert_eq!(via_engine.sentences, direct.sentences);
}

#[test]
fn search_response_serializes_engine_tag_lowercase() {
    let engine = RagEngine::new();
    engine.add_documents(vec![doc("cat mat content")]);
    let value = serde_json::to_value(engine.search("cat", 5)).expect("serialize");
    assert_eq!(value["engine"], "tfidf");

    let empty = serde_json::to_value(RagEngine::new().search("cat", 5)).expect("serialize");
    assert!(empty.get("engine").is_none(), "empty corpus omits the engine tag");
}

#[test]
fn concurrent_readers_and_writer_do_not_interfere() {
    let engine = Arc::new(RagEngine::new());
    engine.add_documents(vec![doc("seed document about cats")]);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                for _ in 0..50 {
                    let response = engine.search("cats", 5);
                    // Readers must observe a fully built backend or none.
                    if !response.results.is_empty() {
                        assert!(response.engine.is_some());
                    }
                }
            });
        }
        let writer = Arc::clone(&engine);
        scope.spawn(move || {
            for i in 0..20 {
                writer.add_documents(vec![doc(&format!("extra document {i} about cats"))]);
            }
        });
    });

    assert_eq!(engine.len(), 21);
}
