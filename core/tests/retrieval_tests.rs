use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use vsm_core::{DocId, InvertedIndex, Retriever, ScoredDocument, WeightingScheme, TOP_K};

fn cat_dog() -> InvertedIndex {
    [("cat", 1, 2), ("cat", 2, 1), ("dog", 2, 3)].into_iter().collect()
}

fn ids(scored: &[ScoredDocument]) -> Vec<DocId> { scored.iter().map(|s| s.doc_id).collect() }

#[test]
fn binary_dog_query() {
    let r = Retriever::new(&cat_dog(), WeightingScheme::Binary).unwrap();
    assert_eq!(r.vectorize(&["dog"]).get("dog"), Some(&1.0));
    let scored = r.query_scored(&["dog"]);
    assert_eq!(ids(&scored), vec![2]);
    assert!((scored[0].score - 1.0 / 2f64.sqrt()).abs() < 1e-9);
    assert_eq!(r.query(&["dog"]), vec![2]);
}

#[test]
fn term_frequency_repeated_cat_query() {
    let r = Retriever::new(&cat_dog(), WeightingScheme::TermFrequency).unwrap();
    let q = r.vectorize(&["cat", "cat"]);
    assert!((q["cat"] - (1.0 + 2f64.log10())).abs() < 1e-9);

    let scored = r.query_scored(&["cat", "cat"]);
    assert_eq!(ids(&scored), vec![1, 2]);
    assert!((scored[0].score - 1.0).abs() < 1e-9);
    let doc2_norm = (1.0 + (1.0 + 3f64.log10()).powi(2)).sqrt();
    assert!((scored[1].score - 1.0 / doc2_norm).abs() < 1e-9);
    assert!((scored[1].score - 0.5606).abs() < 1e-3);
}

#[test]
fn tfidf_prefers_the_rarer_term() {
    // "cat" is everywhere, "dog" only in doc 2
    let r = Retriever::new(&cat_dog(), WeightingScheme::TfIdf).unwrap();
    assert_eq!(r.query(&["cat", "dog"]), vec![2, 1]);
}

#[test]
fn empty_query_for_every_scheme() {
    let tokens: Vec<String> = Vec::new();
    for scheme in WeightingScheme::ALL {
        let r = Retriever::new(&cat_dog(), scheme).unwrap();
        assert!(r.query(&tokens).is_empty(), "{scheme}");
    }
}

#[test]
fn at_most_ten_results() {
    let index: InvertedIndex = (1..=30).map(|d| ("common", d, 1 + d % 4)).collect();
    let r = Retriever::new(&index, WeightingScheme::TfIdf).unwrap();
    let out = r.query_scored(&["common"]);
    assert_eq!(out.len(), TOP_K);
    let unique: HashSet<DocId> = out.iter().map(|s| s.doc_id).collect();
    assert_eq!(unique.len(), TOP_K);
}

#[test]
fn concurrent_queries_match_serial_results() {
    let index: InvertedIndex = (1..=40u32)
        .flat_map(|d| [(format!("t{}", d % 7), d, 1 + d % 3), (format!("t{}", d % 5), d, 1)])
        .collect();
    let retriever = Arc::new(Retriever::new(&index, WeightingScheme::TfIdf).unwrap());
    let queries: Vec<Vec<String>> = (0..8).map(|i| vec![format!("t{i}"), format!("t{}", (i + 2) % 7)]).collect();
    let serial: Vec<Vec<DocId>> = queries.iter().map(|q| retriever.query(q)).collect();

    let handles: Vec<_> = queries
        .into_iter()
        .map(|q| {
            let r = Arc::clone(&retriever);
            thread::spawn(move || r.query(&q))
        })
        .collect();
    let parallel: Vec<Vec<DocId>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(parallel, serial);
}

#[test]
fn scalar_multiple_documents_rank_by_doc_id() {
    // each document is a multiple of (1, 1, 1) under tf; the query is parallel to all of them
    let index: InvertedIndex = (1..=12u32).flat_map(|d| [("a", d, d), ("b", d, d), ("c", d, d)]).collect();
    for scheme in [WeightingScheme::Binary, WeightingScheme::TermFrequency] {
        let r = Retriever::new(&index, scheme).unwrap();
        let out = r.query_scored(&["a", "b", "c"]);
        assert_eq!(ids(&out), (1..=10).collect::<Vec<_>>(), "{scheme}");
        assert!(out.iter().all(|s| s.score == 1.0), "{scheme}: {out:?}");
    }
}

fn build_index(docs: &[Vec<(usize, u32)>]) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for (i, postings) in docs.iter().enumerate() {
        for &(term, count) in postings {
            index.add(format!("t{term}"), i as DocId + 1, count);
        }
    }
    index
}

proptest! {
    #[test]
    fn ranking_invariants(
        docs in prop::collection::vec(prop::collection::vec((0usize..6, 1u32..5), 1..6), 1..25),
        query in prop::collection::vec(0usize..8, 0..6),
    ) {
        let index = build_index(&docs);
        let tokens: Vec<String> = query.iter().map(|t| format!("t{t}")).collect();
        let query_terms: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        let matching = (1..=docs.len() as DocId)
            .filter(|&d| index.iter().any(|(t, p)| query_terms.contains(t.as_str()) && p.contains_key(&d)))
            .count();

        for scheme in WeightingScheme::ALL {
            let r = Retriever::new(&index, scheme).unwrap();
            let out = r.query_scored(&tokens);

            prop_assert_eq!(out.len(), matching.min(TOP_K));
            for s in &out {
                prop_assert!(s.score > 0.0 && s.score <= 1.0, "score {} out of range", s.score);
            }
            for w in out.windows(2) {
                prop_assert!(
                    w[0].score > w[1].score || (w[0].score == w[1].score && w[0].doc_id < w[1].doc_id),
                    "bad order {:?}", w
                );
            }
            let unique: HashSet<DocId> = out.iter().map(|s| s.doc_id).collect();
            prop_assert_eq!(unique.len(), out.len());
            prop_assert_eq!(r.query_scored(&tokens), out);
        }
    }

    #[test]
    fn weights_are_non_negative(
        docs in prop::collection::vec(prop::collection::vec((0usize..6, 1u32..50), 1..6), 1..15),
    ) {
        let index = build_index(&docs);
        for scheme in WeightingScheme::ALL {
            let r = Retriever::new(&index, scheme).unwrap();
            for (_, vector) in r.matrix().iter() {
                for &w in vector.values() {
                    prop_assert!(w > 0.0 && w.is_finite());
                }
            }
        }
    }
}
