//! `frontdesk doctor` — Diagnose configuration and data files.

use frontdesk_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Frontdesk Doctor — System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    // Check config
    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            return Ok(());
        }
    };

    // Check credentials
    if config.gemini.api_key.is_some() {
        println!("  ✅ Gemini API key configured");
    } else {
        println!("  ⚠️  No Gemini API key — the primary provider will stay absent");
        issues += 1;
    }
    if config.groq.api_key.is_some() {
        println!("  ✅ Groq API key configured");
    } else {
        println!("  ⚠️  No Groq API key — the secondary and general providers will stay absent");
        issues += 1;
    }

    // Check knowledge base
    match frontdesk_knowledge::load_entries(&config.knowledge.path) {
        Ok(entries) if entries.is_empty() => {
            println!("  ⚠️  Knowledge base is empty — retrieval will return nothing");
            issues += 1;
        }
        Ok(entries) => println!("  ✅ Knowledge base loaded ({} entries)", entries.len()),
        Err(e) => {
            println!("  ❌ Knowledge base unreadable: {e}");
            issues += 1;
        }
    }

    // Check history file
    let history = frontdesk_history::HistoryStore::new(config.history.path.clone());
    let exchanges = history.load().await;
    println!("  ✅ History file readable ({} exchanges)", exchanges.len());

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
