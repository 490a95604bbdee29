//! `frontdesk ask` — Answer a single query from the terminal.
//!
//! Builds the same engine the gateway serves, answers once, and prints
//! the normalized reply. Does not touch the conversation history.

use frontdesk_config::AppConfig;
use frontdesk_engine::AnswerEngine;
use tracing::warn;

pub async fn run(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    if !config.has_any_api_key() {
        warn!("No API keys configured — every provider attempt will degrade to the apology reply");
    }

    let embedder = frontdesk_knowledge::default_embedder();
    let index = frontdesk_knowledge::load_index(&config.knowledge.path, embedder)?;
    let adapters = frontdesk_providers::build_adapters(&config);
    let engine = AnswerEngine::new(index, adapters.primary, adapters.secondary, adapters.general)
        .with_top_k(config.knowledge.top_k);

    let answer = engine.answer(query).await?;
    println!("{answer}");

    Ok(())
}
