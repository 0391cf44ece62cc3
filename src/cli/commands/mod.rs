//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in a submodule:
//! - `localize`: localization runs, failure log replay and config checks

mod localize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::localize::ProviderKind;
use crate::model::EntityKind;

pub use localize::{cmd_check_config, cmd_localize, cmd_replay};

/// geo-altnames CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch localized names for every entity of a kind
    Localize {
        /// Geocoding backend to query
        #[arg(short, long, value_enum)]
        provider: ProviderKind,
        /// Entity kind: city or country
        #[arg(short, long)]
        kind: EntityKind,
        /// Database URL (overrides config and DATABASE_URL)
        #[arg(long)]
        db: Option<String>,
        /// Config file (default: OS config dir)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Skip entities that already have translations
        #[arg(long)]
        skip_translated: bool,
    },
    /// Re-run the entities listed in a failure log
    Replay {
        /// Geocoding backend to query
        #[arg(short, long, value_enum)]
        provider: ProviderKind,
        /// Entity kind the logged IDs refer to
        #[arg(short, long)]
        kind: EntityKind,
        /// Failure log to read (default: the provider's own)
        #[arg(long)]
        log: Option<PathBuf>,
        /// Database URL (overrides config and DATABASE_URL)
        #[arg(long)]
        db: Option<String>,
        /// Config file (default: OS config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show which endpoints and credentials are configured
    CheckConfig {
        /// Config file (default: OS config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Localize {
            provider,
            kind,
            db,
            config,
            skip_translated,
        } => cmd_localize(
            &rt,
            *provider,
            *kind,
            db.as_deref(),
            config.as_deref(),
            *skip_translated,
        ),
        Commands::Replay {
            provider,
            kind,
            log,
            db,
            config,
        } => cmd_replay(
            &rt,
            *provider,
            *kind,
            log.as_deref(),
            db.as_deref(),
            config.as_deref(),
        ),
        Commands::CheckConfig { config } => cmd_check_config(config.as_deref()),
    }
}
