//! Term-weighting schemes shared by document and query vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{RetrievalError, Weight};

/// How a raw occurrence count becomes a vector weight.
///
/// One scheme is chosen when a [`crate::Retriever`] is built and is applied
/// to both the document-term matrix and every query vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeightingScheme {
    /// `1` for every term present.
    #[serde(rename = "binary")]
    Binary,
    /// `1 + log10(count)`.
    #[serde(rename = "tf")]
    TermFrequency,
    /// `tf(count) * idf(df)` with smoothed idf.
    #[default]
    #[serde(rename = "tfidf")]
    TfIdf,
}

impl WeightingScheme {
    pub const ALL: [WeightingScheme; 3] = [Self::Binary, Self::TermFrequency, Self::TfIdf];

    /// Whether weights depend on per-term document frequency.
    pub fn uses_document_frequency(self) -> bool { matches!(self, Self::TfIdf) }

    /// Weight of a term seen `count` times (in a document or in the query).
    ///
    /// `df` is the term's corpus document frequency (0 for terms the index has
    /// never seen) and is ignored unless the scheme is [`WeightingScheme::TfIdf`].
    /// A zero count means the term is absent and weighs nothing.
    pub fn weight(self, count: u32, df: usize, num_docs: usize) -> Weight {
        if count == 0 {
            return 0.0;
        }
        match self {
            Self::Binary => 1.0,
            Self::TermFrequency => tf(count),
            Self::TfIdf => tf(count) * idf(df, num_docs),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::TermFrequency => "tf",
            Self::TfIdf => "tfidf",
        }
    }
}

/// Log-dampened term frequency, `1 + log10(count)`; callers pass `count >= 1`.
pub fn tf(count: u32) -> Weight { 1.0 + Weight::from(count).log10() }

/// Smoothed inverse document frequency, `log10((N + 1) / (df + 1)) + 1`.
///
/// The ratio stays positive for every `df`, so `df = 0` (query-only term) and
/// `df = N` (term in every document) are both finite; the result is >= 1 when
/// `df <= N`.
pub fn idf(df: usize, num_docs: usize) -> Weight {
    ((num_docs as Weight + 1.0) / (df as Weight + 1.0)).log10() + 1.0
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for WeightingScheme {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(Self::Binary),
            "tf" | "term-frequency" => Ok(Self::TermFrequency),
            "tfidf" | "tf-idf" => Ok(Self::TfIdf),
            _ => Err(RetrievalError::InvalidConfiguration { selector: s.to_string() }),
        }
    }
}
