//! geo-altnames - fill in localized names for cities and countries.
//!
//! Walks the entity tables, asks a geocoding backend (Nominatim, Algolia
//! Places or MapQuest) for each entity's names in Russian, English, Kazakh
//! and Ukrainian, and stores them as translation rows. Failed IDs go to a
//! per-provider log that can be replayed later.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod localize;
pub mod model;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    // Credentials usually live in .env
    dotenvy::dotenv().ok();

    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("geo_altnames=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
