//! HTTP server command
//!
//! Runs the catalog API against PostgreSQL, or an in-memory store with
//! `--in-memory`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::{run_server, Catalog, MemoryCatalog, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "STOREFRONT_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Serve from an in-process store instead of PostgreSQL (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Load the demo catalog before serving (skipped if categories exist)
    #[arg(long)]
    pub seed: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let catalog: Arc<dyn Catalog> = if args.in_memory {
        tracing::warn!("Using in-memory catalog; nothing will be persisted");
        Arc::new(MemoryCatalog::new())
    } else {
        let catalog = args.database.connect().await?;
        catalog
            .migrate()
            .await
            .context("Failed to run migrations")?;
        Arc::new(catalog)
    };

    if args.seed {
        let summary = storefront_server::seeds::seed_if_empty(catalog.as_ref())
            .await
            .context("Failed to seed catalog")?;
        if let Some(summary) = summary {
            tracing::info!(?summary, "Demo catalog loaded");
        }
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting storefront server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(catalog, config).await.context("Server error")?;

    Ok(())
}
