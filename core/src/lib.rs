//! Vector-space retrieval over a prebuilt inverted index.
//!
//! A [`Retriever`] turns an [`InvertedIndex`] into a cached document-term
//! matrix under one [`WeightingScheme`], then ranks documents against
//! tokenized queries by cosine similarity.

pub mod error;
pub mod index;
pub mod matrix;
pub mod persist;
pub mod query;
pub mod rank;
pub mod retriever;
pub mod weighting;

pub use error::{Result, RetrievalError};
pub use index::*;
pub use matrix::{DocumentTermMatrix, SparseVector};
pub use rank::{ScoredDocument, TOP_K};
pub use retriever::Retriever;
pub use weighting::WeightingScheme;
