//! frontdesk CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Start the HTTP gateway
//! - `ask`    — Answer a single query from the terminal
//! - `doctor` — Diagnose configuration and data files

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "frontdesk",
    about = "frontdesk — retrieval-augmented school receptionist",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer a single query from the terminal
    Ask {
        /// The question to answer
        query: String,
    },

    /// Diagnose configuration and data files
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { query } => commands::ask::run(&query).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
