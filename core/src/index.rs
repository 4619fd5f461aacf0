use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub type Term = String;
pub type DocId = u32;
pub type Weight = f64;

/// Raw occurrence counts of one term, keyed by document id.
pub type Postings = HashMap<DocId, u32>;

/// term -> (doc_id -> raw count). Built upstream; the retriever only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    terms: HashMap<Term, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Records `count` occurrences of `term` in `doc_id`, adding to any count already present.
    pub fn add(&mut self, term: impl Into<Term>, doc_id: DocId, count: u32) {
        *self.terms.entry(term.into()).or_default().entry(doc_id).or_insert(0) += count;
    }

    pub fn postings(&self, term: &str) -> Option<&Postings> { self.terms.get(term) }

    /// Number of documents the term occurs in (size of its posting map), 0 if unseen.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, HashMap::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Postings)> { self.terms.iter() }

    /// Union of the document ids across every posting map, in ascending order.
    pub fn doc_ids(&self) -> BTreeSet<DocId> {
        self.terms.values().flat_map(|p| p.keys().copied()).collect()
    }

    pub fn num_docs(&self) -> usize { self.doc_ids().len() }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn total_postings(&self) -> usize { self.terms.values().map(HashMap::len).sum() }
}

impl From<HashMap<Term, Postings>> for InvertedIndex {
    fn from(terms: HashMap<Term, Postings>) -> Self { Self { terms } }
}

impl<T: Into<Term>> FromIterator<(T, DocId, u32)> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = (T, DocId, u32)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (term, doc_id, count) in iter {
            index.add(term, doc_id, count);
        }
        index
    }
}
