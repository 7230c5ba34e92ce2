//! In-memory search index
//!
//! Owns the corpus and its embedding matrix and answers similarity
//! queries with a brute-force cosine scan. Read-only after construction,
//! so concurrent readers can share one instance without locking.

use serde::Serialize;

use crate::corpus::{validate_documents, Document};
use crate::embedding::{Embedder, RolePrefixes};
use crate::error::{Result, SearchError};

/// A ranked match
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub document: Document,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

/// Corpus rows plus their embedding matrix, aligned by row index
#[derive(Debug)]
pub struct SearchIndex {
    documents: Vec<Document>,
    matrix: Vec<Vec<f32>>,
    prefixes: RolePrefixes,
}

impl SearchIndex {
    /// Build the index: validate the corpus, embed every document with
    /// the document-role prefix (one batched provider call), and store
    /// the vectors aligned with the rows.
    pub fn build<E: Embedder>(
        embedder: &E,
        documents: Vec<Document>,
        prefixes: RolePrefixes,
    ) -> Result<Self> {
        validate_documents(&documents)?;

        let inputs: Vec<String> = documents
            .iter()
            .map(|doc| prefixes.document_input(&doc.embedding_text()))
            .collect();

        let matrix = embedder.embed_batch(&inputs)?;
        if matrix.len() != documents.len() {
            return Err(SearchError::provider(format!(
                "expected {} embeddings, got {}",
                documents.len(),
                matrix.len()
            )));
        }

        log::debug!("indexed {} documents", documents.len());

        Ok(Self {
            documents,
            matrix,
            prefixes,
        })
    }

    /// Rank every document against `query` and return the top `k`.
    ///
    /// Ordering is strictly descending by score; equal scores keep corpus
    /// order, so results are reproducible for a fixed model and corpus.
    /// `k` larger than the corpus returns the whole corpus ranked; `k` of
    /// zero is an error.
    pub fn search<E: Embedder>(
        &self,
        embedder: &E,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(SearchError::InvalidResultCount(k));
        }

        let query_vector = embedder.embed(&self.prefixes.query_input(query))?;

        let mut scored: Vec<(usize, f32)> = self
            .matrix
            .iter()
            .enumerate()
            .map(|(i, row)| (i, cosine_similarity(&query_vector, row)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k.min(self.documents.len()));

        Ok(scored
            .into_iter()
            .map(|(i, score)| SearchResult {
                document: self.documents[i].clone(),
                score,
            })
            .collect())
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embedding dimensionality of the stored matrix
    pub fn dimension(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    /// The role-prefix convention this index was built with
    pub fn prefixes(&self) -> &RolePrefixes {
        &self.prefixes
    }
}

/// Calculate cosine similarity between two vectors
///
/// Zero-norm vectors (and mismatched lengths) score 0.0 rather than
/// producing NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
