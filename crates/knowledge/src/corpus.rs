//! Corpus loading — a JSON array of knowledge entries, matched per-entry.
//!
//! Each element is tried against the three recognized entry shapes;
//! elements matching none of them are skipped rather than failing the
//! whole load. Only I/O failure or a non-array document is an error.

use std::path::Path;
use std::sync::Arc;

use frontdesk_core::error::KnowledgeError;
use frontdesk_core::knowledge::KnowledgeEntry;
use tracing::{debug, info};

use crate::embedding::Embedder;
use crate::index::EmbeddingIndex;

/// Read and parse the knowledge base file.
pub fn load_entries(path: &Path) -> Result<Vec<KnowledgeEntry>, KnowledgeError> {
    let content = std::fs::read_to_string(path).map_err(|e| KnowledgeError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let raw: Vec<serde_json::Value> =
        serde_json::from_str(&content).map_err(|e| KnowledgeError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let mut entries = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;
    for value in raw {
        match serde_json::from_value::<KnowledgeEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "Skipped knowledge entries matching no known shape");
    }

    Ok(entries)
}

/// Load the knowledge base and build the retrieval index in one step.
pub fn load_index(path: &Path, embedder: Arc<dyn Embedder>) -> Result<EmbeddingIndex, KnowledgeError> {
    let entries = load_entries(path)?;
    info!(
        path = %path.display(),
        entries = entries.len(),
        "Knowledge base loaded"
    );
    Ok(EmbeddingIndex::build(&entries, embedder))
}
