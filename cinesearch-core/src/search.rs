//! Two-phase search engine
//!
//! Construct with an embedding provider, load a corpus, then query. The
//! index is immutable once built, so a loaded engine can be shared
//! across threads behind an `Arc` and queried concurrently.

use std::path::Path;

use crate::corpus::{self, Document};
use crate::embedding::{Embedder, RolePrefixes};
use crate::error::{Result, SearchError};
use crate::index::{SearchIndex, SearchResult};

/// Movie search engine
///
/// Owns the embedding provider and, once a corpus is loaded, the index.
/// `search` before a successful `load` fails with `NotReady`.
pub struct MovieSearch<E> {
    embedder: E,
    prefixes: RolePrefixes,
    index: Option<SearchIndex>,
}

impl<E: Embedder> MovieSearch<E> {
    /// New engine with the nomic prefix convention
    pub fn new(embedder: E) -> Self {
        Self::with_prefixes(embedder, RolePrefixes::default())
    }

    /// New engine with an explicit prefix convention
    ///
    /// The corpus and every query are embedded under this convention; it
    /// must match the convention the model was trained with.
    pub fn with_prefixes(embedder: E, prefixes: RolePrefixes) -> Self {
        Self {
            embedder,
            prefixes,
            index: None,
        }
    }

    /// Build the index from an in-memory corpus
    pub fn load(&mut self, documents: Vec<Document>) -> Result<()> {
        let index = SearchIndex::build(&self.embedder, documents, self.prefixes.clone())?;
        self.index = Some(index);
        Ok(())
    }

    /// Load a CSV corpus and build the index
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let documents = corpus::load_corpus(path)?;
        self.load(documents)
    }

    /// Rank the corpus against `query` and return the top `k`
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let index = self.index.as_ref().ok_or(SearchError::NotReady)?;
        index.search(&self.embedder, query, k)
    }

    /// The built index, if a corpus has been loaded
    pub fn index(&self) -> Option<&SearchIndex> {
        self.index.as_ref()
    }
}
