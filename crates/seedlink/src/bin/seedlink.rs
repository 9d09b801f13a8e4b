//! Generates seeder classes from database tables.
//!
//! Run with:
//! ```
//! cargo run -p seedlink --bin seedlink -- users,posts --max=100
//! ```

use std::path::Path;

use clap::Parser;
use seedlink::cli::Cli;
use seedlink::prelude::*;
use seedlink::{CommandAutoload, StdinConfirm};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "seedlink.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    if let Some(url) = &cli.database_url {
        config
            .connections
            .entry(config.default_connection.clone())
            .or_insert_with(|| url.clone());
    }

    let access = PgDataAccess::connect_lazy(&config.connections)?;
    let registry = FileRegistry::new(config.registry_path(), &config.markers, &config.style())?;
    let stub = match config.stub_file() {
        Some(path) => Stub::load(&path, &config.newline)?,
        None => Stub::bundled(&config.newline),
    };
    let autoload = CommandAutoload::new(&config.autoload, config.project_root.clone());

    tracing::info!("Writing seeders to {}", config.seed_dir().display());

    let mut generator = SeedGenerator::new(access, registry, config)
        .with_stub(stub)
        .with_confirm(StdinConfirm)
        .with_autoload(autoload);

    let outcomes = generator.run(&cli.table_names(), &cli.options()).await?;

    let created = outcomes.iter().filter(|o| o.is_success()).count();
    let declined = outcomes
        .iter()
        .filter(|o| matches!(o, TableOutcome::Declined { .. }))
        .count();
    let failed = outcomes.len() - created - declined;

    tracing::info!("Seed generation finished");
    tracing::info!("  Created:  {created}");
    tracing::info!("  Kept:     {declined}");
    tracing::info!("  Failed:   {failed}");

    if failed > 0 {
        anyhow::bail!("{failed} of {} tables could not be seeded", outcomes.len());
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<SeedLinkConfig> {
    if let Some(path) = &cli.config {
        return Ok(SeedLinkConfig::load(path)?);
    }
    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.exists() {
        return Ok(SeedLinkConfig::load(fallback)?);
    }
    Ok(SeedLinkConfig::default())
}
