use std::collections::HashMap;

use crate::matrix::DocumentTermMatrix;
use crate::rank::{rank, ScoredDocument, TOP_K};
use crate::{query, DocId, InvertedIndex, Result, SparseVector, Term, WeightingScheme};

/// Ranks documents of a fixed index against tokenized queries.
///
/// The document-term matrix is built once in [`Retriever::new`] under the
/// chosen scheme; every query is weighted with that same scheme. Queries only
/// read shared state, so a `&Retriever` can serve many threads at once.
#[derive(Debug, Clone)]
pub struct Retriever {
    scheme: WeightingScheme,
    num_docs: usize,
    doc_freqs: HashMap<Term, usize>,
    matrix: DocumentTermMatrix,
}

impl Retriever {
    pub fn new(index: &InvertedIndex, scheme: WeightingScheme) -> Result<Self> {
        let num_docs = index.num_docs();
        let matrix = DocumentTermMatrix::build(index, scheme, num_docs)?;
        let doc_freqs = index.iter().map(|(term, postings)| (term.clone(), postings.len())).collect();
        tracing::info!(num_docs, num_terms = index.num_terms(), nnz = matrix.nnz(), %scheme, "built document-term matrix");
        Ok(Self { scheme, num_docs, doc_freqs, matrix })
    }

    /// Like [`Retriever::new`], parsing the scheme from `binary`, `tf` or `tfidf`.
    /// Any other selector is an [`crate::RetrievalError::InvalidConfiguration`].
    pub fn from_selector(index: &InvertedIndex, selector: &str) -> Result<Self> {
        Self::new(index, selector.parse()?)
    }

    /// Top [`TOP_K`] document ids for `tokens`, best first.
    pub fn query<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<DocId> {
        self.query_scored(tokens).into_iter().map(|s| s.doc_id).collect()
    }

    pub fn query_scored<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<ScoredDocument> {
        let query = self.vectorize(tokens);
        let results = rank(&self.matrix, &query, TOP_K);
        tracing::debug!(query_terms = query.len(), hits = results.len(), "scored query");
        results
    }

    /// Query vector for `tokens` under this retriever's scheme.
    pub fn vectorize<S: AsRef<str>>(&self, tokens: &[S]) -> SparseVector {
        query::vectorize(tokens, self.scheme, |term| self.document_frequency(term), self.num_docs)
    }

    pub fn scheme(&self) -> WeightingScheme { self.scheme }

    pub fn num_docs(&self) -> usize { self.num_docs }

    pub fn num_terms(&self) -> usize { self.doc_freqs.len() }

    pub fn document_frequency(&self, term: &str) -> usize { self.doc_freqs.get(term).copied().unwrap_or(0) }

    pub fn matrix(&self) -> &DocumentTermMatrix { &self.matrix }
}
