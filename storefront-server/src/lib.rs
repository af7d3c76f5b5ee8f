//! storefront-server: catalog HTTP API
//!
//! Categories, products and tags over PostgreSQL, served with axum.
//! Every handler is a thin translation from a request into one
//! [`db::Catalog`] call and from its result into a JSON response.

pub mod db;
pub mod http;
pub mod models;
pub mod schema;
pub mod seeds;

pub use db::{Catalog, DbError, MemoryCatalog, PgCatalog};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
