//! Load the demo catalog into PostgreSQL

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::seeds;

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Empty every table (and restart ids) before seeding
    #[arg(long)]
    pub reset: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let catalog = args.database.connect().await?;
    catalog.migrate().await.context("Failed to run migrations")?;

    let summary = seeds::seed(&catalog, args.reset)
        .await
        .context("Failed to seed catalog")?;

    println!(
        "Seeded {} categories, {} products, {} tags, {} product tags",
        summary.categories, summary.products, summary.tags, summary.product_tags
    );
    Ok(())
}
