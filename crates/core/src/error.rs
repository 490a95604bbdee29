//! Error types for the frontdesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all frontdesk operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Knowledge base errors ---
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    // --- History errors ---
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Input validation ---
    #[error("Query cannot be empty")]
    EmptyQuery,

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures at the answer-provider boundary.
///
/// The orchestrator converts every one of these into an "absence" and
/// moves on to the next strategy; the variants exist so tests and logs
/// can tell *why* an adapter degraded.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response body: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge base at {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse knowledge base at {path}: {reason}")]
    ParseFailed { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn not_configured_displays_adapter_name() {
        let err = ProviderError::NotConfigured("gemini: no API key".into());
        assert!(err.to_string().contains("gemini"));
    }

    #[test]
    fn knowledge_error_displays_path() {
        let err = Error::Knowledge(KnowledgeError::ParseFailed {
            path: "data/knowledge.json".into(),
            reason: "expected an array".into(),
        });
        assert!(err.to_string().contains("data/knowledge.json"));
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn empty_query_is_its_own_variant() {
        let err = Error::EmptyQuery;
        assert_eq!(err.to_string(), "Query cannot be empty");
    }
}
