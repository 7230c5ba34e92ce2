//! CineSearch core
//!
//! Semantic search over a movie corpus: loads title/plot-summary rows
//! from CSV, embeds them with a pretrained sentence-embedding model, and
//! ranks them against a query by cosine similarity.
//!
//! ## Example
//!
//! ```ignore
//! use cinesearch_core::{EmbeddingEngine, MovieSearch};
//!
//! let embedder = EmbeddingEngine::new()?;
//! let mut search = MovieSearch::new(embedder);
//! search.load_csv("dataset.csv")?;
//!
//! for result in search.search("movies about love", 5)? {
//!     println!("{} ({:.3})", result.document.title, result.score);
//! }
//! ```

pub mod corpus;
pub mod embedding;
pub mod error;
pub mod index;
pub mod search;

// Re-exports for convenience
pub use corpus::{load_corpus, Document};
pub use embedding::{Embedder, EmbeddingConfig, EmbeddingEngine, RolePrefixes};
pub use error::SearchError;
pub use index::{SearchIndex, SearchResult};
pub use search::MovieSearch;

#[cfg(test)]
pub(crate) mod testing;
