//! Brute-force cosine-similarity index over the flattened corpus.
//!
//! One chunk per knowledge entry, one vector per chunk, parallel-indexed.
//! Everything is encoded once at build time; `query` only encodes the
//! incoming text and scans the corpus linearly — the corpus is small and
//! fixed, so no ANN structure is warranted.

use std::sync::Arc;

use frontdesk_core::knowledge::{Chunk, KnowledgeEntry, ScoredChunk};
use tracing::debug;

use crate::embedding::Embedder;

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal.
/// Returns 0.0 if either vector is zero-length, empty, or mismatched.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = f64::from(*x);
        let y = f64::from(*y);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// The in-memory retrieval index: chunks and their vectors, fixed-index
/// aligned, plus the encoder used for both corpus and queries.
pub struct EmbeddingIndex {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingIndex {
    /// Build the index from loaded entries, encoding every chunk once.
    pub fn build(entries: &[KnowledgeEntry], embedder: Arc<dyn Embedder>) -> Self {
        let chunks: Vec<Chunk> = entries.iter().map(|e| Chunk::new(e.flatten())).collect();
        let vectors: Vec<Vec<f32>> = chunks.iter().map(|c| embedder.encode(&c.text)).collect();

        debug!(
            chunks = chunks.len(),
            encoder = embedder.name(),
            "Embedding index built"
        );

        Self {
            chunks,
            vectors,
            embedder,
        }
    }

    /// Number of chunks in the corpus.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Rank corpus chunks by similarity to `text`, best first.
    ///
    /// Uses the same encoder as `build`. Ties keep corpus order (stable
    /// sort). `top_k` is capped at the corpus size; an empty corpus yields
    /// an empty result, never an error.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<ScoredChunk> {
        if self.chunks.is_empty() {
            return Vec::new();
        }

        let query_vector = self.embedder.encode(text);

        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(self.vectors.iter())
            .map(|(chunk, vector)| ScoredChunk {
                text: chunk.text.clone(),
                similarity: cosine_similarity(vector, &query_vector),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        scored
    }
}
