//! Groq adapters — OpenAI-compatible chat completions.
//!
//! One shared client, two adapters over it:
//! - `GroqContextual` (secondary): system persona carrying the retrieved
//!   context, then the user query; temperature 0.5.
//! - `GroqGeneral` (tertiary): generic persona, no retrieved context;
//!   temperature 0.7.
//!
//! Both cap output at 100 tokens and trim successful text.

use async_trait::async_trait;
use frontdesk_core::error::ProviderError;
use frontdesk_core::knowledge::ScoredChunk;
use frontdesk_core::provider::AnswerAdapter;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ANSWER_TOKENS: u32 = 100;
const CONTEXTUAL_TEMPERATURE: f32 = 0.5;
const GENERAL_TEMPERATURE: f32 = 0.7;

/// Shared chat-completions client for the Groq adapters.
#[derive(Clone)]
pub struct GroqClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl GroqClient {
    /// Create a new client. A `None` or empty key leaves it permanently
    /// unconfigured; every call then returns `NotConfigured`.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
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

    /// Whether a credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one chat exchange and return the first completion's text.
    async fn chat(
        &self,
        messages: Vec<ApiMessage>,
        temperature: f32,
    ) -> std::result::Result<String, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured("groq: no API key".into()));
        };

        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": temperature,
            "max_tokens": MAX_ANSWER_TOKENS,
        });

        debug!(provider = "groq", model = %self.model, temperature, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
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
                "Invalid Groq API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Groq API error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("Failed to parse Groq response: {e}"))
        })?;

        let choice = api_resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("No choices in response".into()))?;

        Ok(choice.message.content.unwrap_or_default().trim().to_string())
    }
}

/// Context-grounded Groq adapter.
pub struct GroqContextual {
    client: GroqClient,
}

impl GroqContextual {
    pub fn new(client: GroqClient) -> Self {
        Self { client }
    }

    fn system_message(context: &[ScoredChunk]) -> String {
        let context_text = context
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "You are a school receptionist. Use the following info to answer politely and concisely:\n{context_text}"
        )
    }
}

#[async_trait]
impl AnswerAdapter for GroqContextual {
    fn name(&self) -> &str {
        "groq"
    }

    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn answer(
        &self,
        query: &str,
        context: &[ScoredChunk],
    ) -> std::result::Result<String, ProviderError> {
        let messages = vec![
            ApiMessage::system(Self::system_message(context)),
            ApiMessage::user(query),
        ];
        self.client.chat(messages, CONTEXTUAL_TEMPERATURE).await
    }
}

/// Context-free Groq adapter — the terminal strategy of the chain.
pub struct GroqGeneral {
    client: GroqClient,
}

impl GroqGeneral {
    pub fn new(client: GroqClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerAdapter for GroqGeneral {
    fn name(&self) -> &str {
        "groq-general"
    }

    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn answer(
        &self,
        query: &str,
        _context: &[ScoredChunk],
    ) -> std::result::Result<String, ProviderError> {
        let messages = vec![
            ApiMessage::system(
                "You are a helpful school receptionist. Keep responses friendly and under 2 lines.",
            ),
            ApiMessage::user(query),
        ];
        self.client.chat(messages, GENERAL_TEMPERATURE).await
    }
}

// --- Wire types ---

#[derive(Debug, Clone, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

impl ApiMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
