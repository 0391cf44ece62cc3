//! Localization run, replay and configuration commands.

use std::path::Path;

use anyhow::Context;
use sqlx::sqlite::SqlitePool;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::db;
use crate::localize::{Localizer, ProviderKind, ReqwestTransport, RunOptions, build_provider};
use crate::model::EntityKind;

/// Localize every entity of `kind` through `provider`
pub fn cmd_localize(
    rt: &Runtime,
    provider: ProviderKind,
    kind: EntityKind,
    db_url: Option<&str>,
    config_path: Option<&Path>,
    skip_translated: bool,
) -> anyhow::Result<()> {
    let config = config::load(config_path)?;
    let options = RunOptions {
        skip_translated: skip_translated || config.run.skip_translated,
        ..Default::default()
    };
    let localizer = localizer(provider, &config, options)?;

    rt.block_on(async {
        let pool = open_store(db_url, &config).await?;
        println!(
            "Localizing {} via {} (failures -> {})",
            kind.table(),
            provider,
            localizer.failure_log_path().display()
        );

        let summary = localizer.localize(&pool, kind).await?;
        println!();
        println!("Done: {}", summary);
        anyhow::Ok(())
    })
}

/// Re-run the IDs listed in a failure log
pub fn cmd_replay(
    rt: &Runtime,
    provider: ProviderKind,
    kind: EntityKind,
    log: Option<&Path>,
    db_url: Option<&str>,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = config::load(config_path)?;
    let localizer = localizer(provider, &config, RunOptions::default())?;
    let log = log
        .unwrap_or_else(|| localizer.failure_log_path())
        .to_path_buf();

    rt.block_on(async {
        let pool = open_store(db_url, &config).await?;
        println!("Replaying {} via {}", log.display(), provider);

        let summary = localizer.replay(&pool, kind, &log).await?;
        println!();
        println!("Done: {}", summary);
        anyhow::Ok(())
    })
}

/// Print the effective configuration, without secrets
pub fn cmd_check_config(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = config::load(config_path)?;

    match config_path.map(Path::to_path_buf).or_else(config::config_path) {
        Some(path) if path.exists() => println!("Config file: {}", path.display()),
        Some(path) => println!("Config file: {} (not found, defaults)", path.display()),
        None => println!("Config file: none (defaults)"),
    }
    println!("Database:    {}", config.database.url);
    println!();

    for kind in [ProviderKind::Nominatim, ProviderKind::Algolia, ProviderKind::Mapquest] {
        let (url, delay_ms, failure_log) = match kind {
            ProviderKind::Nominatim => (
                &config.nominatim.url,
                config.nominatim.delay_ms,
                &config.nominatim.failure_log,
            ),
            ProviderKind::Algolia => (
                &config.algolia.url,
                config.algolia.delay_ms,
                &config.algolia.failure_log,
            ),
            ProviderKind::Mapquest => (
                &config.mapquest.url,
                config.mapquest.delay_ms,
                &config.mapquest.failure_log,
            ),
        };

        let status = match build_provider(kind, &config) {
            Ok(_) => "✓ ready".to_string(),
            Err(e) => format!("✗ {}", e),
        };
        println!("{}: {}", kind, status);
        println!("  url:         {}", url);
        println!("  delay:       {} ms", delay_ms);
        println!("  failure log: {}", failure_log.display());
        if kind == ProviderKind::Algolia {
            println!("  backups:     {}", config.algolia.backup_hosts.join(", "));
        }
    }
    Ok(())
}

fn localizer(
    provider: ProviderKind,
    config: &Config,
    options: RunOptions,
) -> anyhow::Result<Localizer> {
    let provider = build_provider(provider, config)?;
    let transport =
        ReqwestTransport::new(provider.config().timeout).context("building HTTP client")?;
    Ok(Localizer::new(provider, Box::new(transport)).with_options(options))
}

async fn open_store(db_url: Option<&str>, config: &Config) -> anyhow::Result<SqlitePool> {
    let url = db_url.unwrap_or(&config.database.url);
    db::connect(url)
        .await
        .with_context(|| format!("opening database {}", url))
}
