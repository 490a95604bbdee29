//! Answer-provider implementations for frontdesk.
//!
//! All adapters implement the `frontdesk_core::AnswerAdapter` trait.
//! `build_adapters` assembles the fallback chain from configuration.

pub mod gemini;
pub mod groq;

pub use gemini::GeminiContextual;
pub use groq::{GroqClient, GroqContextual, GroqGeneral};

use std::sync::Arc;

use frontdesk_config::AppConfig;
use frontdesk_core::provider::AnswerAdapter;
use tracing::debug;

/// The three adapters of the fallback chain, in priority order.
pub struct AdapterSet {
    /// Context-grounded Gemini adapter.
    pub primary: Arc<dyn AnswerAdapter>,

    /// Context-grounded Groq adapter.
    pub secondary: Arc<dyn AnswerAdapter>,

    /// Context-free Groq adapter, the terminal strategy.
    pub general: Arc<dyn AnswerAdapter>,
}

/// Build the adapter set from configuration.
///
/// A missing credential never fails assembly — the adapter is built
/// unconfigured and stays permanently absent at call time.
pub fn build_adapters(config: &AppConfig) -> AdapterSet {
    let gemini = GeminiContextual::new(config.gemini.api_key.clone(), &config.gemini.model);
    let groq = GroqClient::new(config.groq.api_key.clone(), &config.groq.model);

    debug!(
        gemini_configured = gemini.is_configured(),
        groq_configured = groq.is_configured(),
        "Adapter set assembled"
    );

    AdapterSet {
        primary: Arc::new(gemini),
        secondary: Arc::new(GroqContextual::new(groq.clone())),
        general: Arc::new(GroqGeneral::new(groq)),
    }
}
