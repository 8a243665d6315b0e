//! Vault Index - per-chain index of enriched yield vault records

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

// Use the library crate
use vault_index::cli::commands;
use vault_index::config::Config;

/// Vault Index - enriched vault records per chain
#[derive(Parser)]
#[command(name = "vault-index")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the index and keep it refreshed until Ctrl-C
    Run,

    /// List the vaults of a chain
    List {
        /// Chain id
        #[arg(long, default_value = "1")]
        chain: u64,

        /// Print full records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single vault as JSON
    Find {
        /// Chain id
        #[arg(long, default_value = "1")]
        chain: u64,

        /// Vault address (0x-prefixed)
        #[arg(long)]
        address: String,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vault_index=info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Run => commands::run(&config).await,
        Commands::List { chain, json } => commands::list(&config, chain, json),
        Commands::Find { chain, address } => commands::find(&config, chain, &address),
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
