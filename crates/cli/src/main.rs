//! BotSwarm CLI: operator tooling around the dispatcher.
//!
//! Commands:
//! - `config validate` Check the config file and report clamped values
//! - `config show`     Print the effective configuration
//! - `config path`     Print where the config file is read from
//! - `config init`     Write a default config file
//! - `opcodes`         List the master opcodes bots react to

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "botswarm",
    about = "BotSwarm: master-packet bot dispatcher",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of ~/.botswarm/playerbot.toml
    #[arg(short, long, global = true, env = "BOTSWARM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List the intercepted opcodes and their handlers
    Opcodes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate the configuration
    Validate,
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
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

    let config_path = cli.config.as_deref();
    tracing::debug!(config = ?config_path, "botswarm starting");
    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate(config_path)?,
            ConfigAction::Show => commands::config_cmd::show(config_path)?,
            ConfigAction::Path => commands::config_cmd::path(config_path)?,
            ConfigAction::Init { force } => commands::config_cmd::init(config_path, force)?,
        },
        Commands::Opcodes { json } => commands::opcodes::run(json)?,
    }

    Ok(())
}
