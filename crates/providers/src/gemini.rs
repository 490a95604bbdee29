//! Gemini adapter — the primary, context-grounded strategy.
//!
//! Calls the generateContent REST endpoint directly:
//! - `x-goog-api-key` header authentication (not Bearer)
//! - a single role-framed prompt embedding the retrieved context and the
//!   fixed receptionist persona
//! - answer text extracted from `candidates[0].content.parts[0].text`;
//!   any shape deviation is a `MalformedResponse`

use async_trait::async_trait;
use frontdesk_core::error::ProviderError;
use frontdesk_core::knowledge::ScoredChunk;
use frontdesk_core::provider::AnswerAdapter;
use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Context-grounded Gemini adapter.
pub struct GeminiContextual {
    name: String,
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl GeminiContextual {
    /// Create a new adapter. A `None` or empty key leaves the adapter
    /// permanently unconfigured; every call then returns `NotConfigured`.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Role-framed receptionist prompt embedding the retrieved context.
    fn build_prompt(query: &str, context: &[ScoredChunk]) -> String {
        let context_text = context
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are Klassy, the school receptionist at Delhi Public School Shaheedpath, Lucknow.\n\
             \n\
             Be brief, polite, and speak naturally, like a real human receptionist.\n\
             Only answer school-related queries based on the info below.\n\
             If the info isn't available, politely say so and suggest checking the school website or contact.\n\
             \n\
             Context:\n\
             {context_text}\n\
             \n\
             Question: {query}\n\
             Answer:"
        )
    }
}

#[async_trait]
impl AnswerAdapter for GeminiContextual {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn answer(
        &self,
        query: &str,
        context: &[ScoredChunk],
    ) -> std::result::Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured("gemini: no API key".into()));
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let prompt = Self::build_prompt(query, context);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(provider = %self.name, model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Gemini API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: GenerateContentResponse = response.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("Failed to parse Gemini response: {e}"))
        })?;

        let text = api_resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("No text candidate in response".into())
            })?;

        Ok(text.trim().to_string())
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: String,
}
