//! Configuration loading, validation, and management for frontdesk.
//!
//! Loads configuration from `frontdesk.toml` (or `$FRONTDESK_CONFIG`) with
//! environment variable overrides for credentials and paths. Validates all
//! settings at load time. Missing credentials are never a hard failure —
//! the affected provider simply stays unconfigured and the fallback chain
//! degrades around it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `frontdesk.toml`.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Primary generation service (Gemini-style REST API).
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Secondary generation service (Groq, OpenAI-compatible chat API).
    #[serde(default)]
    pub groq: GroqConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Knowledge base settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Conversation history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini", &self.gemini)
            .field("groq", &self.groq)
            .field("gateway", &self.gateway)
            .field("knowledge", &self.knowledge)
            .field("history", &self.history)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key. Overridden by `GEMINI_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash-latest".into()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// API key. Overridden by `GROQ_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_groq_model")]
    pub model: String,
}

fn default_groq_model() -> String {
    "llama3-8b-8192".into()
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_groq_model(),
        }
    }
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Path to the static knowledge base (JSON array of entries).
    #[serde(default = "default_knowledge_path")]
    pub path: PathBuf,

    /// How many chunks to retrieve per provider attempt.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_knowledge_path() -> PathBuf {
    PathBuf::from("data/knowledge.json")
}
fn default_top_k() -> usize {
    3
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Path to the conversation history file.
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("chat_history.json")
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    ///
    /// The file path is `$FRONTDESK_CONFIG` if set, otherwise
    /// `frontdesk.toml` in the working directory. A missing file yields
    /// defaults. Environment variables applied afterwards (highest
    /// priority):
    /// - `GEMINI_API_KEY`, `GROQ_API_KEY`
    /// - `FRONTDESK_HOST`, `FRONTDESK_PORT`
    /// - `FRONTDESK_KNOWLEDGE`, `FRONTDESK_HISTORY`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("FRONTDESK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("frontdesk.toml"));
        let mut config = Self::load_from(&path)?;

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.gemini.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                config.groq.api_key = Some(key);
            }
        }
        if let Ok(host) = std::env::var("FRONTDESK_HOST") {
            config.gateway.host = host;
        }
        if let Ok(port) = std::env::var("FRONTDESK_PORT") {
            config.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("FRONTDESK_PORT is not a port: {port}"))
            })?;
        }
        if let Ok(path) = std::env::var("FRONTDESK_KNOWLEDGE") {
            config.knowledge.path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("FRONTDESK_HISTORY") {
            config.history.path = PathBuf::from(path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.knowledge.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "knowledge.top_k must be at least 1".into(),
            ));
        }
        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Check whether any provider credential is available.
    ///
    /// With no credential at all, every request degrades to the apology
    /// response — worth a startup warning, never a startup failure.
    pub fn has_any_api_key(&self) -> bool {
        self.gemini.api_key.is_some() || self.groq.api_key.is_some()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
