//! The store seam between route handlers and persistence
//!
//! Handlers only see [`Catalog`]. [`PgCatalog`] backs it with PostgreSQL;
//! [`crate::db::MemoryCatalog`] keeps the same semantics in process.

use async_trait::async_trait;
use sqlx::PgPool;

use super::records::{Category, CategoryWithProducts, ProductDetail, Tag, TagWithProducts};
use super::repos::{CategoryRepo, ProductRepo, TagRepo};
use super::{migrations, DbError};
use crate::models::{CategoryName, NewProduct, ProductChanges, TagName};

/// Data-access operations for every catalog resource.
///
/// Id-scoped reads and updates return `None` when no row has the id;
/// deletes return the number of rows removed. Neither case is an error.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, DbError>;
    async fn get_category(&self, id: i32) -> Result<Option<CategoryWithProducts>, DbError>;
    async fn create_category(&self, name: CategoryName) -> Result<Category, DbError>;
    async fn update_category(
        &self,
        id: i32,
        name: CategoryName,
    ) -> Result<Option<Category>, DbError>;
    async fn delete_category(&self, id: i32) -> Result<u64, DbError>;

    async fn list_products(&self) -> Result<Vec<ProductDetail>, DbError>;
    async fn get_product(&self, id: i32) -> Result<Option<ProductDetail>, DbError>;
    async fn create_product(&self, new: NewProduct) -> Result<ProductDetail, DbError>;
    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<Option<ProductDetail>, DbError>;
    async fn delete_product(&self, id: i32) -> Result<u64, DbError>;

    async fn list_tags(&self) -> Result<Vec<TagWithProducts>, DbError>;
    async fn get_tag(&self, id: i32) -> Result<Option<TagWithProducts>, DbError>;
    async fn create_tag(&self, name: TagName) -> Result<Tag, DbError>;
    async fn update_tag(&self, id: i32, name: TagName) -> Result<Option<Tag>, DbError>;
    async fn delete_tag(&self, id: i32) -> Result<u64, DbError>;

    /// Remove every row and restart id generation at 1.
    async fn truncate(&self) -> Result<(), DbError>;

    /// Cheap reachability check for health probes.
    async fn ping(&self) -> Result<(), DbError>;
}

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create any missing tables.
    pub async fn migrate(&self) -> Result<(), DbError> {
        migrations::run(&self.pool).await
    }

    /// Drop and recreate every table.
    pub async fn reset_schema(&self) -> Result<(), DbError> {
        migrations::reset(&self.pool).await
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, DbError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn get_category(&self, id: i32) -> Result<Option<CategoryWithProducts>, DbError> {
        CategoryRepo::new(&self.pool).get(id).await
    }

    async fn create_category(&self, name: CategoryName) -> Result<Category, DbError> {
        CategoryRepo::new(&self.pool).create(name).await
    }

    async fn update_category(
        &self,
        id: i32,
        name: CategoryName,
    ) -> Result<Option<Category>, DbError> {
        CategoryRepo::new(&self.pool).update(id, name).await
    }

    async fn delete_category(&self, id: i32) -> Result<u64, DbError> {
        CategoryRepo::new(&self.pool).delete(id).await
    }

    async fn list_products(&self) -> Result<Vec<ProductDetail>, DbError> {
        ProductRepo::new(&self.pool).list().await
    }

    async fn get_product(&self, id: i32) -> Result<Option<ProductDetail>, DbError> {
        ProductRepo::new(&self.pool).get(id).await
    }

    async fn create_product(&self, new: NewProduct) -> Result<ProductDetail, DbError> {
        ProductRepo::new(&self.pool).create(new).await
    }

    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<Option<ProductDetail>, DbError> {
        ProductRepo::new(&self.pool).update(id, changes).await
    }

    async fn delete_product(&self, id: i32) -> Result<u64, DbError> {
        ProductRepo::new(&self.pool).delete(id).await
    }

    async fn list_tags(&self) -> Result<Vec<TagWithProducts>, DbError> {
        TagRepo::new(&self.pool).list().await
    }

    async fn get_tag(&self, id: i32) -> Result<Option<TagWithProducts>, DbError> {
        TagRepo::new(&self.pool).get(id).await
    }

    async fn create_tag(&self, name: TagName) -> Result<Tag, DbError> {
        TagRepo::new(&self.pool).create(name).await
    }

    async fn update_tag(&self, id: i32, name: TagName) -> Result<Option<Tag>, DbError> {
        TagRepo::new(&self.pool).update(id, name).await
    }

    async fn delete_tag(&self, id: i32) -> Result<u64, DbError> {
        TagRepo::new(&self.pool).delete(id).await
    }

    async fn truncate(&self) -> Result<(), DbError> {
        sqlx::query(&migrations::truncate_sql())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
