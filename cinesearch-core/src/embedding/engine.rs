//! fastembed-backed embedding engine
//!
//! Wraps a local ONNX sentence-embedding model with a DashMap cache for
//! repeated lookups.

use dashmap::DashMap;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;

use super::Embedder;
use crate::error::{Result, SearchError};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// fastembed model to load (default: nomic-embed-text-v1.5, 768d)
    pub model: EmbeddingModel,
    /// Where model weights are cached between runs
    pub cache_dir: PathBuf,
    /// Show a progress bar while downloading weights
    pub show_download_progress: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: EmbeddingModel::NomicEmbedTextV15,
            cache_dir: default_cache_dir(),
            show_download_progress: true,
        }
    }
}

/// Model cache directory: `CINESEARCH_MODEL_CACHE` if set, else
/// `.fastembed_cache` in the working directory
fn default_cache_dir() -> PathBuf {
    match std::env::var_os("CINESEARCH_MODEL_CACHE") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(".fastembed_cache"),
    }
}

/// Embedding engine with caching
///
/// Construction loads (and on first run downloads) the model weights, so
/// it is expensive; every embedding call after that is cheap. The cache
/// is keyed by the exact input text, prefix included.
pub struct EmbeddingEngine {
    model: TextEmbedding,
    cache: DashMap<String, Vec<f32>>,
}

impl EmbeddingEngine {
    /// Create the engine with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(EmbeddingConfig::default())
    }

    /// Create the engine with a custom configuration
    pub fn with_config(config: EmbeddingConfig) -> Result<Self> {
        log::info!(
            "loading embedding model {:?} (cache: {})",
            config.model,
            config.cache_dir.display()
        );

        let model = TextEmbedding::try_new(
            InitOptions::new(config.model)
                .with_cache_dir(config.cache_dir)
                .with_show_download_progress(config.show_download_progress),
        )
        .map_err(|e| SearchError::provider(format!("failed to load embedding model: {e}")))?;

        Ok(Self {
            model,
            cache: DashMap::new(),
        })
    }

    /// Number of cached embeddings
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Embedder for EmbeddingEngine {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(cached) = self.cache.get(text) {
            return Ok(cached.clone());
        }

        let mut vectors = self
            .model
            .embed(vec![text], None)
            .map_err(|e| SearchError::provider(format!("failed to embed text: {e}")))?;
        let vector = vectors
            .pop()
            .ok_or_else(|| SearchError::provider("model returned no embedding"))?;

        self.cache.insert(text.to_string(), vector.clone());
        Ok(vector)
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        // Check cache for all texts
        let mut results: Vec<Option<Vec<f32>>> = texts
            .iter()
            .map(|text| self.cache.get(text.as_str()).map(|v| v.clone()))
            .collect();

        // Find uncached texts
        let uncached: Vec<(usize, &String)> = results
            .iter()
            .enumerate()
            .filter(|(_, cached)| cached.is_none())
            .map(|(i, _)| (i, &texts[i]))
            .collect();

        if uncached.is_empty() {
            return Ok(results.into_iter().flatten().collect());
        }

        // Batch embed uncached texts
        let uncached_texts: Vec<&str> = uncached.iter().map(|(_, t)| t.as_str()).collect();
        let new_embeddings = self
            .model
            .embed(uncached_texts, None)
            .map_err(|e| SearchError::provider(format!("failed to embed batch: {e}")))?;

        if new_embeddings.len() != uncached.len() {
            return Err(SearchError::provider(format!(
                "model returned {} embeddings for {} inputs",
                new_embeddings.len(),
                uncached.len()
            )));
        }

        // Update cache and results
        for ((idx, text), embedding) in uncached.iter().zip(new_embeddings.into_iter()) {
            self.cache.insert((*text).clone(), embedding.clone());
            results[*idx] = Some(embedding);
        }

        Ok(results.into_iter().flatten().collect())
    }
}
