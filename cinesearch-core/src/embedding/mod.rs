//! Embedding provider abstraction
//!
//! The model is treated as an opaque function from text to a fixed-length
//! vector. `EmbeddingEngine` is the production implementation (fastembed,
//! local ONNX inference).

mod engine;

pub use engine::{EmbeddingConfig, EmbeddingEngine};

use crate::error::Result;

/// Opaque text-embedding provider
///
/// One vector per input string, order preserved, fixed dimensionality for
/// a given model. Implementations must be deterministic for a fixed model
/// identity. The first call may be expensive (model load); later calls
/// are cheap.
pub trait Embedder: Send + Sync {
    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch, one vector per input in the same order
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Textual role markers prepended to inputs before embedding
///
/// Asymmetric models are trained with distinct document and query
/// prefixes; vectors from the two encodings are only comparable when the
/// corpus and every query are embedded by the same model under the same
/// convention. Defaults follow the nomic-embed-text family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePrefixes {
    pub document: String,
    pub query: String,
}

impl RolePrefixes {
    /// Convention used by the nomic-embed-text family
    pub fn nomic() -> Self {
        Self {
            document: "search_document: ".to_string(),
            query: "search_query: ".to_string(),
        }
    }

    /// Embedding input for a corpus document
    pub fn document_input(&self, text: &str) -> String {
        format!("{}{}", self.document, text)
    }

    /// Embedding input for a search query
    pub fn query_input(&self, text: &str) -> String {
        format!("{}{}", self.query, text)
    }
}

impl Default for RolePrefixes {
    fn default() -> Self {
        Self::nomic()
    }
}
