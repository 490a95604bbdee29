//! The fallback orchestrator — one final answer per query, trying
//! progressively less-specialized strategies.
//!
//! Chain, terminal on first accepted result:
//! 1. Direct intercept for location questions (no provider is called)
//! 2. Contextual primary (Gemini), rejected on hedging phrases
//! 3. Contextual secondary (Groq), rejected on "i don't know"
//! 4. Context-free general (Groq) — always terminates the chain
//!
//! Ordering is cost/quality: the context-aware, higher-quality provider
//! first, then a cheaper context-aware one, then a generic reply rather
//! than a hard failure. Adapter errors are converted to absence here and
//! never reach the caller.

use std::sync::Arc;

use frontdesk_core::error::Error;
use frontdesk_core::provider::AnswerAdapter;
use frontdesk_knowledge::EmbeddingIndex;
use tracing::{debug, info, warn};

use crate::normalize::normalize;

/// Lowercased query substrings that short-circuit straight to the
/// normalizer (which answers location questions with the canned address).
const INTERCEPT_PHRASES: &[&str] = &[
    "where is the school",
    "location of school",
    "how to reach",
    "address of school",
    "school situated",
    "school location",
    "kaha hai",
    "school kahan",
    "school address",
];

/// Phrases that disqualify a primary answer (case-insensitive substrings).
const PRIMARY_REJECT_PHRASES: &[&str] = &[
    "i don't know",
    "i do not know",
    "not available",
    "check the school website",
];

/// Phrase that disqualifies a secondary answer.
const SECONDARY_REJECT_PHRASE: &str = "i don't know";

const DEFAULT_TOP_K: usize = 3;

/// The answer engine: retrieval index plus the three-adapter chain.
pub struct AnswerEngine {
    index: EmbeddingIndex,
    primary: Arc<dyn AnswerAdapter>,
    secondary: Arc<dyn AnswerAdapter>,
    general: Arc<dyn AnswerAdapter>,
    top_k: usize,
}

impl AnswerEngine {
    /// Create a new engine over a built index and the adapter chain.
    pub fn new(
        index: EmbeddingIndex,
        primary: Arc<dyn AnswerAdapter>,
        secondary: Arc<dyn AnswerAdapter>,
        general: Arc<dyn AnswerAdapter>,
    ) -> Self {
        Self {
            index,
            primary,
            secondary,
            general,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override how many chunks each contextual attempt retrieves.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Produce exactly one final answer for `query`.
    ///
    /// The only error is `Error::EmptyQuery`; provider failures degrade
    /// the chain and end, at worst, in the normalized apology.
    pub async fn answer(&self, query: &str) -> Result<String, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        info!(query_len = query.len(), "Answering query");
        let query_lower = query.to_lowercase();

        // ── State 1: direct intercept ──
        if INTERCEPT_PHRASES.iter().any(|p| query_lower.contains(p)) {
            debug!("Direct intercept matched, skipping providers");
            return Ok(normalize(None, query));
        }

        // ── State 2: contextual primary ──
        let chunks = self.index.query(query, self.top_k);
        match self.primary.answer(query, &chunks).await {
            Ok(text) if !contains_any(&text, PRIMARY_REJECT_PHRASES) => {
                info!(provider = self.primary.name(), "Answer accepted");
                return Ok(normalize(Some(&text), query));
            }
            Ok(_) => {
                info!(provider = self.primary.name(), "Answer rejected, trying next");
            }
            Err(e) => {
                warn!(provider = self.primary.name(), error = %e, "Provider failed, trying next");
            }
        }

        // ── State 3: contextual secondary (independent retrieval) ──
        let chunks = self.index.query(query, self.top_k);
        match self.secondary.answer(query, &chunks).await {
            Ok(text) if !text.to_lowercase().contains(SECONDARY_REJECT_PHRASE) => {
                info!(provider = self.secondary.name(), "Answer accepted");
                return Ok(normalize(Some(&text), query));
            }
            Ok(_) => {
                info!(provider = self.secondary.name(), "Answer rejected, trying next");
            }
            Err(e) => {
                warn!(provider = self.secondary.name(), error = %e, "Provider failed, trying next");
            }
        }

        // ── State 4: context-free general — always terminal ──
        let text = match self.general.answer(query, &[]).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(provider = self.general.name(), error = %e, "Provider failed, answering with apology");
                None
            }
        };
        Ok(normalize(text.as_deref(), query))
    }
}

/// Case-insensitive substring check against a phrase set.
fn contains_any(text: &str, phrases: &[&str]) -> bool {
    let lower = text.to_lowercase();
    phrases.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{APOLOGY_REPLY, SCHOOL_ADDRESS_REPLY};
    use async_trait::async_trait;
    use frontdesk_core::error::ProviderError;
    use frontdesk_core::knowledge::{KnowledgeEntry, ScoredChunk};
    use frontdesk_knowledge::HashEmbedder;
    use std::sync::Mutex;

    /// A mock adapter that returns a fixed result and counts calls.
    struct MockAdapter {
        name: String,
        result: Result<String, ProviderError>,
        call_count: Mutex<usize>,
    }

    impl MockAdapter {
        fn text(name: &str, text: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.into(),
                result: Ok(text.into()),
                call_count: Mutex::new(0),
            })
        }

        fn failing(name: &str, error: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                name: name.into(),
                result: Err(error),
                call_count: Mutex::new(0),
            })
        }

        fn absent(name: &str) -> Arc<Self> {
            Self::failing(name, ProviderError::NotConfigured(format!("{name}: no API key")))
        }

        fn calls(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl AnswerAdapter for MockAdapter {
        fn name(&self) -> &str {
            &self.name
        }

        async fn answer(
            &self,
            _query: &str,
            _context: &[ScoredChunk],
        ) -> Result<String, ProviderError> {
            *self.call_count.lock().unwrap() += 1;
            self.result.clone()
        }
    }

    fn test_index() -> EmbeddingIndex {
        let entries = vec![
            KnowledgeEntry::Qa {
                question: "What are the school timings?".into(),
                answer: "8 AM to 2 PM.".into(),
            },
            KnowledgeEntry::Bare {
                content: "The annual sports day is held in December.".into(),
            },
        ];
        EmbeddingIndex::build(&entries, Arc::new(HashEmbedder))
    }

    fn engine(
        primary: Arc<MockAdapter>,
        secondary: Arc<MockAdapter>,
        general: Arc<MockAdapter>,
    ) -> AnswerEngine {
        AnswerEngine::new(test_index(), primary, secondary, general)
    }

    #[tokio::test]
    async fn primary_accepted_stops_the_chain() {
        let primary = MockAdapter::text("primary", "Timings are 8 AM to 2 PM");
        let secondary = MockAdapter::text("secondary", "unused");
        let general = MockAdapter::text("general", "unused");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("what are the timings?")
            .await
            .unwrap();

        assert_eq!(answer, "Timings are 8 AM to 2 PM.");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);
        assert_eq!(general.calls(), 0);
    }

    #[tokio::test]
    async fn rejection_phrase_falls_through_to_secondary() {
        let primary = MockAdapter::text("primary", "I don't know, please check the school website");
        let secondary = MockAdapter::text("secondary", "Timings are 8 AM to 2 PM");
        let general = MockAdapter::text("general", "unused");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("what are the timings?")
            .await
            .unwrap();

        assert_eq!(answer, "Timings are 8 AM to 2 PM.");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(general.calls(), 0);
    }

    #[tokio::test]
    async fn rejection_is_case_insensitive() {
        let primary = MockAdapter::text("primary", "That information is NOT AVAILABLE right now");
        let secondary = MockAdapter::text("secondary", "Here is the real answer");
        let general = MockAdapter::text("general", "unused");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("fee structure?")
            .await
            .unwrap();

        assert_eq!(answer, "Here is the real answer.");
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn primary_failure_falls_through_to_secondary() {
        let primary = MockAdapter::failing(
            "primary",
            ProviderError::ApiError {
                status_code: 500,
                message: "Internal Server Error".into(),
            },
        );
        let secondary = MockAdapter::text("secondary", "Recovered answer");
        let general = MockAdapter::text("general", "unused");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("fee structure?")
            .await
            .unwrap();

        assert_eq!(answer, "Recovered answer.");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(general.calls(), 0);
    }

    #[tokio::test]
    async fn secondary_hedge_falls_through_to_general() {
        let primary = MockAdapter::absent("primary");
        let secondary = MockAdapter::text("secondary", "Sorry, I don't know that one");
        let general = MockAdapter::text("general", "A friendly general reply");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("cafeteria menu?")
            .await
            .unwrap();

        assert_eq!(answer, "A friendly general reply.");
        assert_eq!(secondary.calls(), 1);
        assert_eq!(general.calls(), 1);
    }

    #[tokio::test]
    async fn all_absent_yields_apology() {
        let primary = MockAdapter::absent("primary");
        let secondary = MockAdapter::absent("secondary");
        let general = MockAdapter::absent("general");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("something obscure")
            .await
            .unwrap();

        assert_eq!(answer, APOLOGY_REPLY);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(general.calls(), 1);
    }

    #[tokio::test]
    async fn intercept_bypasses_all_providers() {
        let primary = MockAdapter::text("primary", "unused");
        let secondary = MockAdapter::text("secondary", "unused");
        let general = MockAdapter::text("general", "unused");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("where is the school")
            .await
            .unwrap();

        assert_eq!(answer, SCHOOL_ADDRESS_REPLY);
        assert_eq!(primary.calls(), 0);
        assert_eq!(secondary.calls(), 0);
        assert_eq!(general.calls(), 0);
    }

    #[tokio::test]
    async fn transliterated_intercept_bypasses_providers() {
        let primary = MockAdapter::text("primary", "unused");
        let secondary = MockAdapter::text("secondary", "unused");
        let general = MockAdapter::text("general", "unused");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("school kahan hai bhai")
            .await
            .unwrap();

        assert_eq!(answer, SCHOOL_ADDRESS_REPLY);
        assert_eq!(primary.calls(), 0);
    }

    #[tokio::test]
    async fn address_keyword_overwrites_accepted_answer() {
        // Not an intercept phrase, but the normalizer's keyword set still
        // forces the canonical address over whatever the provider said.
        let primary = MockAdapter::text("primary", "We are near the city center");
        let secondary = MockAdapter::text("secondary", "unused");
        let general = MockAdapter::text("general", "unused");

        let answer = engine(primary.clone(), secondary.clone(), general.clone())
            .answer("what is your location please")
            .await
            .unwrap();

        assert_eq!(answer, SCHOOL_ADDRESS_REPLY);
        assert_eq!(primary.calls(), 1);
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let result = engine(
            MockAdapter::text("primary", "x"),
            MockAdapter::text("secondary", "x"),
            MockAdapter::text("general", "x"),
        )
        .answer("   ")
        .await;

        assert!(matches!(result, Err(Error::EmptyQuery)));
    }

    #[tokio::test]
    async fn answers_always_end_in_terminal_punctuation() {
        for (p, s, g) in [
            ("Plain answer without period", "x", "x"),
            ("i do not know", "Second answer", "x"),
            ("not available", "i don't know", "Third answer"),
        ] {
            let answer = engine(
                MockAdapter::text("primary", p),
                MockAdapter::text("secondary", s),
                MockAdapter::text("general", g),
            )
            .answer("sports day?")
            .await
            .unwrap();
            assert!(answer.ends_with(['.', '!', '?']), "bad ending: {answer}");
            assert!(!answer.is_empty());
        }
    }

    #[tokio::test]
    async fn empty_corpus_still_answers() {
        let index = EmbeddingIndex::build(&[], Arc::new(HashEmbedder));
        let primary = MockAdapter::text("primary", "Answer without any context");
        let engine = AnswerEngine::new(
            index,
            primary.clone(),
            MockAdapter::text("secondary", "x"),
            MockAdapter::text("general", "x"),
        );

        let answer = engine.answer("anything").await.unwrap();
        assert_eq!(answer, "Answer without any context.");
    }
}
