//! Deterministic embedder stub for tests

use std::sync::Mutex;

use crate::corpus::Document;
use crate::embedding::Embedder;
use crate::error::Result;

/// Keyword-to-axis embedder: an input containing the nth keyword gets 1.0
/// in the nth component; an input matching no keyword maps to the zero
/// vector. Records every input it is asked to embed.
pub struct StubEmbedder {
    keywords: Vec<&'static str>,
    seen: Mutex<Vec<String>>,
}

impl StubEmbedder {
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Every input embedded so far, in call order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.keywords.len()];
        for (i, keyword) in self.keywords.iter().enumerate() {
            if text.contains(keyword) {
                vector[i] = 1.0;
            }
        }
        vector
    }
}

impl Embedder for StubEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.vector_for(text))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Shorthand document constructor
pub fn doc(index: usize, title: &str, summary: &str) -> Document {
    Document::new(index, title, summary)
}
