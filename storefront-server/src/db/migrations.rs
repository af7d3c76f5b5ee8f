//! Schema migrations rendered from [`crate::schema`]

use sqlx::PgPool;

use crate::db::DbError;
use crate::schema::TABLES;

/// Create all tables that don't exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running catalog migrations...");

    for table in TABLES.iter() {
        tracing::debug!(table = table.name, "create table");
        sqlx::query(&table.create_sql()).execute(pool).await?;
    }

    tracing::info!("Catalog migrations complete");
    Ok(())
}

/// Drop every table and recreate the schema from scratch.
pub async fn reset(pool: &PgPool) -> Result<(), DbError> {
    tracing::warn!("Dropping all catalog tables");

    for table in TABLES.iter().rev() {
        sqlx::query(&table.drop_sql()).execute(pool).await?;
    }

    run(pool).await
}

/// `TRUNCATE` statement emptying every table and restarting id sequences.
pub(crate) fn truncate_sql() -> String {
    let names: Vec<&str> = TABLES.iter().map(|t| t.name).collect();
    format!("TRUNCATE {} RESTART IDENTITY CASCADE", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_covers_all_tables() {
        assert_eq!(
            truncate_sql(),
            "TRUNCATE categories, products, tags, product_tags RESTART IDENTITY CASCADE"
        );
    }
}
