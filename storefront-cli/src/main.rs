//! storefront CLI - catalog API server and database tooling
//!
//! - `serve`: run the HTTP API
//! - `migrate`: create (or reset) the schema
//! - `seed`: load the demo catalog

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "storefront",
    author,
    version,
    about = "Catalog API for categories, products and tags"
)]
struct Cli {
    /// Debug logging (when RUST_LOG is not set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create missing tables, or drop and recreate them with --reset
    Migrate(commands::migrate::MigrateArgs),
    /// Load the demo catalog (categories, products, tags)
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
        Commands::Seed(args) => commands::seed::run_seed(args).await,
    }
}
