//! TF-IDF vector space over corpus documents.
//!
//! Sublinear TF (1 + ln(tf)), smooth IDF, unigram + bigram vocabulary
//! capped at [`MAX_VOCAB`] terms, and L2-normalized sparse rows so cosine
//! similarity reduces to a dot product.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::{Error, Result};
use crate::corpus::Corpus;
use crate::text::tokenize;

/// Maximum vocabulary size (most-informative terms by document frequency).
pub const MAX_VOCAB: usize = 5000;

/// Sparse vector: parallel arrays of dimension indices and values.
#[derive(Debug, Clone, Default)]
pub struct SparseVec {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseVec {
    /// Dot product via a merge walk over the sorted index arrays.
    pub fn dot(&self, other: &SparseVec) -> f32 {
        let mut sum = 0.0f32;
        let (mut i, mut j) = (0, 0);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        sum
    }

    /// True if the vector has no non-zero dimensions.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn l2_normalize(&mut self) {
        let norm: f32 = self.values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

/// Fitted vector space: vocabulary, IDF weights, one row per record.
///
/// Immutable after construction. A changed corpus (filtering included)
/// requires a fresh [`VectorSpace::fit`]; there is no incremental update.
pub struct VectorSpace {
    vocab: HashMap<String, u32>,
    idf: Vec<f32>,
    doc_vectors: Vec<SparseVec>,
}

impl VectorSpace {
    /// Fit a vector space over the corpus documents.
    ///
    /// An empty corpus builds an empty space so callers can still serve
    /// (empty) results. A non-empty corpus in which no document yields a
    /// single token fails with `Error::EmptyCorpus`; the loader's fallback
    /// placeholder makes that a data bug rather than a reachable state.
    pub fn fit(corpus: &Corpus) -> Result<Self> {
        if corpus.is_empty() {
            return Ok(Self {
                vocab: HashMap::new(),
                idf: Vec::new(),
                doc_vectors: Vec::new(),
            });
        }

        let tokenized: Vec<Vec<String>> = corpus
            .records()
            .iter()
            .map(|r| tokenize(&r.document))
            .collect();

        if tokenized.iter().all(|tokens| tokens.is_empty()) {
            return Err(Error::EmptyCorpus);
        }

        let n = corpus.len() as f32;

        let mut df: HashMap<String, u32> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        // Most-informative first: document frequency descending, with an
        // alphabetical tie-break so index assignment is deterministic.
        let mut terms: Vec<(String, u32)> = df.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(MAX_VOCAB);

        let vocab: HashMap<String, u32> = terms
            .iter()
            .enumerate()
            .map(|(idx, (term, _))| (term.clone(), idx as u32))
            .collect();

        // Smooth IDF: ln(1 + n/(1+df)) + 1. A corpus-wide term always
        // weighs less than a singleton term.
        let idf: Vec<f32> = terms
            .iter()
            .map(|(_, doc_freq)| (1.0 + n / (1.0 + *doc_freq as f32)).ln() + 1.0)
            .collect();

        let doc_vectors: Vec<SparseVec> = tokenized
            .iter()
            .map(|tokens| weigh(tokens, &vocab, &idf))
            .collect();

        debug!(records = corpus.len(), vocabulary = vocab.len(), "fitted vector space");

        Ok(Self {
            vocab,
            idf,
            doc_vectors,
        })
    }

    /// Project a raw query string into the space. Out-of-vocabulary terms
    /// contribute nothing; a query with no known terms yields a zero vector.
    pub fn embed_query(&self, query: &str) -> SparseVec {
        weigh(&tokenize(query), &self.vocab, &self.idf)
    }

    /// Cosine similarity of `probe` against every document row, in corpus
    /// order.
    pub fn score_all(&self, probe: &SparseVec) -> Vec<f32> {
        self.doc_vectors.iter().map(|doc| probe.dot(doc)).collect()
    }

    /// The fitted row for a record, if the index is in range.
    pub fn doc_vector(&self, index: usize) -> Option<&SparseVec> {
        self.doc_vectors.get(index)
    }

    /// Number of document rows (equals the fitted corpus length).
    pub fn len(&self) -> usize {
        self.doc_vectors.len()
    }

    /// True if the space was fitted over an empty corpus.
    pub fn is_empty(&self) -> bool {
        self.doc_vectors.is_empty()
    }

    /// Number of terms in the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }
}

/// Build an L2-normalized TF-IDF sparse vector from tokens.
fn weigh(tokens: &[String], vocab: &HashMap<String, u32>, idf: &[f32]) -> SparseVec {
    if tokens.is_empty() {
        return SparseVec::default();
    }

    let mut tf: HashMap<u32, u32> = HashMap::new();
    for token in tokens {
        if let Some(&idx) = vocab.get(token) {
            *tf.entry(idx).or_insert(0) += 1;
        }
    }

    let mut indices: Vec<u32> = tf.keys().copied().collect();
    indices.sort_unstable();

    let values: Vec<f32> = indices
        .iter()
        .map(|&idx| {
            let sublinear_tf = 1.0 + (tf[&idx] as f32).ln();
            sublinear_tf * idf[idx as usize]
        })
        .collect();

    let mut vec = SparseVec { indices, values };
    vec.l2_normalize();
    vec
}
