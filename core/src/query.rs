//! Query vectorization under the retriever's weighting scheme.

use std::collections::HashMap;

use crate::{SparseVector, Term, WeightingScheme};

/// Query-local occurrence count per term.
pub fn term_counts<S: AsRef<str>>(tokens: &[S]) -> HashMap<Term, u32> {
    let mut counts: HashMap<Term, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Builds the query vector for already-tokenized terms.
///
/// `document_frequency` returns the corpus df of a term (0 when the index has
/// never seen it). Tokens are used verbatim.
pub fn vectorize<S, F>(tokens: &[S], scheme: WeightingScheme, document_frequency: F, num_docs: usize) -> SparseVector
where
    S: AsRef<str>,
    F: Fn(&str) -> usize,
{
    term_counts(tokens)
        .into_iter()
        .map(|(term, count)| {
            let df = if scheme.uses_document_frequency() { document_frequency(&term) } else { 0 };
            let weight = scheme.weight(count, df, num_docs);
            (term, weight)
        })
        .collect()
}
