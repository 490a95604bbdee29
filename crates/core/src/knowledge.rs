//! Knowledge base domain types.
//!
//! A `KnowledgeEntry` is one record of the static corpus. Entries come in
//! three recognized shapes; anything else is skipped at load time. Each
//! entry flattens into exactly one `Chunk`, the atomic retrieval granule.

use serde::{Deserialize, Serialize};

/// One entry of the static knowledge base.
///
/// Untagged: the loader tries the variants in order, so the shapes with
/// more fields must come first. `Bare` is last because the other shapes
/// would otherwise degrade into it whenever they carry a `content` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnowledgeEntry {
    /// A question/answer pair.
    Qa { question: String, answer: String },

    /// A titled document fragment.
    Titled { title: String, content: String },

    /// Bare content.
    Bare { content: String },
}

impl KnowledgeEntry {
    /// Flatten the entry into chunk text: fields joined by a single space.
    pub fn flatten(&self) -> String {
        match self {
            Self::Qa { question, answer } => format!("{question} {answer}"),
            Self::Titled { title, content } => format!("{title} {content}"),
            Self::Bare { content } => content.clone(),
        }
    }
}

/// Flattened text derived from one knowledge entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The flattened text.
    pub text: String,
}

impl Chunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A chunk returned from similarity ranking, with its cosine score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// The flattened chunk text.
    pub text: String,

    /// Cosine similarity to the query, in [-1, 1].
    pub similarity: f32,
}
