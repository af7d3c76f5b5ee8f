//! Database layer - connection pool, schema migrations and the catalog store
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default)
//! - Nested reads are parent query + child query by key, assembled in Rust
//! - Rely on DB constraints for referential integrity, no check-then-insert
//! - Transactions only where one product write spans two tables

pub mod catalog;
mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod records;
pub mod repos;

pub use catalog::{Catalog, PgCatalog};
pub use error::DbError;
pub use memory::MemoryCatalog;
pub use pool::{create_pool, create_pool_with_options};
