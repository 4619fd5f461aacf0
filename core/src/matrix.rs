//! Document-term matrix: one sparse weight vector per document.

use std::collections::HashMap;

use crate::{DocId, InvertedIndex, Result, RetrievalError, Term, Weight, WeightingScheme};

/// Term -> weight, holding only terms with a nonzero weight.
pub type SparseVector = HashMap<Term, Weight>;

/// Matrix row for a 1-based document id; `None` for id 0.
pub fn row_of(doc_id: DocId) -> Option<usize> { doc_id.checked_sub(1).map(|r| r as usize) }

/// Document id stored at a matrix row.
pub fn doc_id_of(row: usize) -> DocId { row as DocId + 1 }

/// Weighted document vectors indexed by `doc_id - 1`. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTermMatrix {
    rows: Vec<SparseVector>,
}

impl DocumentTermMatrix {
    /// Weights every posting of `index` under `scheme`.
    ///
    /// Document frequency is taken once per term. Fails if a posting uses
    /// document id 0, stores a zero count, or names a document beyond
    /// `num_docs` (ids must be dense over `1..=num_docs`).
    pub fn build(index: &InvertedIndex, scheme: WeightingScheme, num_docs: usize) -> Result<Self> {
        let mut rows = vec![SparseVector::new(); num_docs];
        for (term, postings) in index.iter() {
            let df = if scheme.uses_document_frequency() { postings.len() } else { 0 };
            for (&doc_id, &count) in postings {
                let row = row_of(doc_id).ok_or_else(|| RetrievalError::InvalidDocumentId { term: term.clone() })?;
                if count == 0 {
                    return Err(RetrievalError::ZeroCount { term: term.clone(), doc_id });
                }
                let slot = match rows.get_mut(row) {
                    Some(slot) => slot,
                    None => {
                        let max_doc_id = index.doc_ids().last().copied().unwrap_or(doc_id);
                        return Err(RetrievalError::SparseDocumentIds { max_doc_id, num_docs });
                    }
                };
                slot.insert(term.clone(), scheme.weight(count, df, num_docs));
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn get(&self, doc_id: DocId) -> Option<&SparseVector> { self.rows.get(row_of(doc_id)?) }

    /// Rows in ascending document id order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &SparseVector)> {
        self.rows.iter().enumerate().map(|(row, v)| (doc_id_of(row), v))
    }

    /// Total stored weights across all rows.
    pub fn nnz(&self) -> usize { self.rows.iter().map(HashMap::len).sum() }
}
