//! # Frontdesk Knowledge
//!
//! The retrieval half of the service: loads the static knowledge corpus,
//! encodes every chunk once into a fixed-length vector, and ranks chunks
//! against incoming queries by cosine similarity.
//!
//! The corpus and its vectors are built once at startup and shared
//! read-only across requests — encoding is a pure function of the text,
//! so no locking is needed after construction.

pub mod corpus;
pub mod embedding;
pub mod index;

pub use corpus::{load_entries, load_index};
pub use embedding::{default_embedder, Embedder, HashEmbedder, EMBEDDING_DIM};
pub use index::{cosine_similarity, EmbeddingIndex};

#[cfg(feature = "local")]
pub use embedding::FastembedEmbedder;
