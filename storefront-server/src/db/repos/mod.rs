//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Nested rows are fetched with one `ANY($1)` query per association (no N+1)
//! - Id-scoped writes report zero matched rows rather than erroring
//! - Referential integrity is left to the foreign keys

pub mod categories;
pub mod products;
pub mod tags;

pub use categories::CategoryRepo;
pub use products::ProductRepo;
pub use tags::TagRepo;
