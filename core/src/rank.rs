//! Cosine-similarity ranking over the document-term matrix.

use serde::Serialize;
use std::cmp::Ordering;

use crate::{DocId, DocumentTermMatrix, SparseVector, Weight};

/// Number of results a query returns at most.
pub const TOP_K: usize = 10;

/// Significant digits kept in a reported score.
const SCORE_DIGITS: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub score: Weight,
}

/// Euclidean length of a sparse vector.
pub fn magnitude(v: &SparseVector) -> Weight { v.values().map(|w| w * w).sum::<Weight>().sqrt() }

/// Cosine clamped to `(0, 1]` and rounded to [`SCORE_DIGITS`] significant
/// digits, so mathematically equal similarities compare equal and fall
/// through to the doc id tie-break. `cosine` must be positive.
fn round_score(cosine: Weight) -> Weight {
    let cosine = cosine.min(1.0);
    let exponent = cosine.log10().floor() as i32;
    let scale = (10.0 as Weight).powi(SCORE_DIGITS - 1 - exponent);
    (cosine * scale).round() / scale
}

/// Descending score, ascending doc id on ties.
fn by_rank(a: &ScoredDocument, b: &ScoredDocument) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.doc_id.cmp(&b.doc_id))
}

/// Scores every document sharing a term with `query` and keeps the best `k`.
///
/// Documents with no overlapping term are not candidates at all. A query with
/// zero magnitude (no weights) yields no results.
pub fn rank(matrix: &DocumentTermMatrix, query: &SparseVector, k: usize) -> Vec<ScoredDocument> {
    let query_norm = magnitude(query);
    if query_norm == 0.0 {
        return Vec::new();
    }

    let mut scored: Vec<ScoredDocument> = Vec::new();
    for (doc_id, doc) in matrix.iter() {
        let mut dot = 0.0;
        let mut sq_norm = 0.0;
        // only the document's own terms; the query is the lookup side
        for (term, w) in doc {
            dot += w * query.get(term).copied().unwrap_or(0.0);
            sq_norm += w * w;
        }
        if dot > 0.0 {
            let score = round_score(dot / (query_norm * sq_norm.sqrt()));
            scored.push(ScoredDocument { doc_id, score });
        }
    }

    scored.sort_by(by_rank);
    scored.truncate(k);
    scored
}
