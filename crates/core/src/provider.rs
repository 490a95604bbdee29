//! AnswerAdapter trait — the abstraction over answer-generation backends.
//!
//! An adapter knows how to turn a query (and optionally retrieved context)
//! into answer text by calling one external generation service. The
//! fallback orchestrator calls adapters in priority order without knowing
//! which service backs them — pure polymorphism.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::knowledge::ScoredChunk;

/// The core AnswerAdapter trait.
///
/// Failures never cross this boundary as panics: transport errors,
/// non-success statuses, and malformed bodies all come back as
/// [`ProviderError`], and the orchestrator treats any error as absence.
#[async_trait]
pub trait AnswerAdapter: Send + Sync {
    /// A human-readable name for this adapter (e.g., "gemini", "groq").
    fn name(&self) -> &str;

    /// Whether a credential is present.
    ///
    /// Unconfigured adapters stay permanently absent: every `answer` call
    /// returns [`ProviderError::NotConfigured`].
    fn is_configured(&self) -> bool {
        true
    }

    /// Produce an answer for `query`, optionally grounded in `context`.
    ///
    /// Context-free adapters ignore `context`. Successful text is
    /// whitespace-trimmed before being returned.
    async fn answer(
        &self,
        query: &str,
        context: &[ScoredChunk],
    ) -> std::result::Result<String, ProviderError>;
}
