//! Text encoders behind the `Embedder` trait.
//!
//! Two implementations:
//! - `HashEmbedder` — deterministic 384-dim token feature hashing. No model
//!   download, identical output for identical text, shared-token overlap
//!   gives cosine similarity real structure. The default.
//! - `FastembedEmbedder` (feature `local`) — AllMiniLML6V2 via `fastembed`,
//!   the same 384-dim sentence encoder family used for production corpora.
//!   Falls back to hash encoding when the model fails.

use std::sync::Arc;

use sha2::{Digest, Sha256};

/// Fixed output dimension for every encoder in this crate.
pub const EMBEDDING_DIM: usize = 384;

/// Maps text to a fixed-length vector.
///
/// Implementations must be deterministic: the same text always encodes to
/// the same vector, for the lifetime of the process.
pub trait Embedder: Send + Sync {
    /// Encoder name (e.g., "hash", "minilm").
    fn name(&self) -> &str;

    /// Output vector dimension.
    fn dimension(&self) -> usize;

    /// Encode one text into a vector of `dimension()` floats.
    fn encode(&self, text: &str) -> Vec<f32>;
}

/// Deterministic token feature-hashing encoder.
///
/// Lowercased alphanumeric tokens are hashed into one of 384 buckets with
/// a ±1 sign, then the vector is L2-normalized. Whitespace-only text
/// encodes to the zero vector.
pub struct HashEmbedder;

impl Embedder for HashEmbedder {
    fn name(&self) -> &str {
        "hash"
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        hash_encode(text)
    }
}

/// SHA-256 token hashing into a signed, L2-normalized 384-dim vector.
pub(crate) fn hash_encode(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; EMBEDDING_DIM];

    let lowered = text.to_lowercase();
    for token in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let digest = Sha256::digest(token.as_bytes());
        let mut bucket_bytes = [0u8; 8];
        bucket_bytes.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(bucket_bytes) % EMBEDDING_DIM as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign;
    }

    let norm = vector
        .iter()
        .map(|v| f64::from(*v) * f64::from(*v))
        .sum::<f64>()
        .sqrt();
    if norm > 1e-10 {
        for v in vector.iter_mut() {
            *v = (f64::from(*v) / norm) as f32;
        }
    }

    vector
}

/// AllMiniLML6V2 sentence encoder via `fastembed`.
///
/// `TextEmbedding::embed` takes `&mut self`, so the model sits behind a
/// `Mutex` to keep the outer type `Send + Sync`.
#[cfg(feature = "local")]
pub struct FastembedEmbedder {
    model: std::sync::Mutex<fastembed::TextEmbedding>,
}

#[cfg(feature = "local")]
impl FastembedEmbedder {
    /// Load the model. Returns `None` when it cannot be initialized
    /// (e.g., no network to fetch the weights) so callers can fall back
    /// to the hash encoder.
    pub fn load() -> Option<Self> {
        match fastembed::TextEmbedding::try_new(
            fastembed::InitOptions::new(fastembed::EmbeddingModel::AllMiniLML6V2)
                .with_show_download_progress(false),
        ) {
            Ok(model) => {
                tracing::info!("AllMiniLML6V2 embedding model loaded");
                Some(Self {
                    model: std::sync::Mutex::new(model),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Embedding model unavailable, falling back to hash encoder");
                None
            }
        }
    }
}

#[cfg(feature = "local")]
impl Embedder for FastembedEmbedder {
    fn name(&self) -> &str {
        "minilm"
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIM
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut model = match self.model.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match model.embed(vec![text.to_string()], None) {
            Ok(mut vectors) if !vectors.is_empty() => {
                let mut v = vectors.remove(0);
                v.resize(EMBEDDING_DIM, 0.0);
                v
            }
            Ok(_) => hash_encode(text),
            Err(e) => {
                tracing::warn!(error = %e, "Model embedding failed, using hash encoding");
                hash_encode(text)
            }
        }
    }
}

/// Build the process-wide encoder.
///
/// With the `local` feature this tries the MiniLM model first; otherwise
/// (or when the model cannot load) it is the hash encoder.
pub fn default_embedder() -> Arc<dyn Embedder> {
    #[cfg(feature = "local")]
    {
        if let Some(model) = FastembedEmbedder::load() {
            return Arc::new(model);
        }
    }
    Arc::new(HashEmbedder)
}
