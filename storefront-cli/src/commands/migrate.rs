use anyhow::{Context, Result};
use clap::Parser;

use super::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Drop all tables before recreating them (destroys data)
    #[arg(long)]
    pub reset: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let catalog = args.database.connect().await?;

    if args.reset {
        catalog
            .reset_schema()
            .await
            .context("Failed to reset schema")?;
    } else {
        catalog.migrate().await.context("Failed to run migrations")?;
    }

    println!("Schema is up to date");
    Ok(())
}
