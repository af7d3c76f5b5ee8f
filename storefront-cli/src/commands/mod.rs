pub mod migrate;
pub mod seed;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;
use storefront_server::db::{create_pool_with_options, pool::DEFAULT_MAX_CONNECTIONS};
use storefront_server::PgCatalog;

/// Database connection options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "STOREFRONT_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    pub async fn connect(&self) -> Result<PgCatalog> {
        let url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        let pool = create_pool_with_options(url, self.max_connections)
            .await
            .context("Failed to create database pool")?;

        Ok(PgCatalog::new(pool))
    }
}
