//! `frontdesk serve` — Start the HTTP gateway.

use frontdesk_config::AppConfig;
use tracing::warn;

pub async fn run(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    if let Some(port) = port {
        config.gateway.port = port;
    }

    if !config.has_any_api_key() {
        warn!("No API keys configured — every provider attempt will degrade to the apology reply");
    }

    frontdesk_gateway::start(config).await
}
