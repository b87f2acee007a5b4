mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spec-sync")]
#[command(about = "Synchronize specification documents from files and URLs into one directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one sync batch
    Sync {
        /// Config file (TOML, YAML, or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print results as a JSON array instead of text
        #[arg(long)]
        json: bool,
        /// Keep re-running on the configured interval
        #[arg(long)]
        watch: bool,
    },
    /// Validate a config without fetching anything
    Check {
        /// Config file (TOML, YAML, or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sync {
            config,
            json,
            watch,
        } => {
            let config = config::load_config(config.as_deref())?;
            commands::sync::run(&config, json, watch).await
        }
        Command::Check { config } => {
            let config = config::load_config(config.as_deref())?;
            commands::check::run(&config)
        }
    }
}
