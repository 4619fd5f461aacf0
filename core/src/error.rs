use thiserror::Error;

use crate::{DocId, Term};

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    /// Weighting selector not one of `binary`, `tf`, `tfidf`.
    #[error("invalid configuration: unknown weighting scheme {selector:?} (expected binary, tf or tfidf)")]
    InvalidConfiguration { selector: String },

    /// Document ids are 1-based.
    #[error("posting for term {term:?} uses document id 0")]
    InvalidDocumentId { term: Term },

    #[error("posting for term {term:?} in document {doc_id} has count 0")]
    ZeroCount { term: Term, doc_id: DocId },

    #[error("document ids are not dense: highest id {max_doc_id} but only {num_docs} distinct documents")]
    SparseDocumentIds { max_doc_id: DocId, num_docs: usize },
}
