//! Category repository
//!
//! - list/get: categories plus one `ANY($1)` query for their products
//! - update/delete: report zero matched rows instead of failing

use sqlx::PgPool;

use crate::db::records::{attach_products, Category, CategoryWithProducts, Product};
use crate::db::DbError;
use crate::models::CategoryName;

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories with their products (two queries, no N+1).
    pub async fn list(&self) -> Result<Vec<CategoryWithProducts>, DbError> {
        let categories: Vec<Category> =
            sqlx::query_as("SELECT id, category_name FROM categories ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        self.with_products(categories).await
    }

    /// Get one category with its products.
    pub async fn get(&self, id: i32) -> Result<Option<CategoryWithProducts>, DbError> {
        let category: Option<Category> =
            sqlx::query_as("SELECT id, category_name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        let Some(category) = category else {
            return Ok(None);
        };

        Ok(self.with_products(vec![category]).await?.pop())
    }

    pub async fn create(&self, name: CategoryName) -> Result<Category, DbError> {
        let category = sqlx::query_as(
            r#"
            INSERT INTO categories (category_name)
            VALUES ($1)
            RETURNING id, category_name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(category)
    }

    /// Rename a category. `None` when no row has this id.
    pub async fn update(&self, id: i32, name: CategoryName) -> Result<Option<Category>, DbError> {
        let category = sqlx::query_as(
            r#"
            UPDATE categories SET category_name = $2
            WHERE id = $1
            RETURNING id, category_name
            "#,
        )
        .bind(id)
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Delete a category, returning the number of rows removed.
    ///
    /// Products that referenced it keep existing with `category_id` cleared.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn with_products(
        &self,
        categories: Vec<Category>,
    ) -> Result<Vec<CategoryWithProducts>, DbError> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
        let products: Vec<Product> = sqlx::query_as(
            r#"
            SELECT id, product_name, price, stock, category_id
            FROM products
            WHERE category_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(attach_products(categories, products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;
    use crate::db::migrations;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p storefront-server -- --ignored

    async fn repo_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_update_delete_roundtrip() {
        let pool = repo_pool().await;
        let repo = CategoryRepo::new(&pool);

        let created = repo
            .create(CategoryName::new("Repo Test").unwrap())
            .await
            .unwrap();

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.category_name, "Repo Test");
        assert!(fetched.products.is_empty());

        let renamed = repo
            .update(created.id, CategoryName::new("Renamed").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.category_name, "Renamed");

        assert_eq!(repo.delete(created.id).await.unwrap(), 1);
        assert_eq!(repo.delete(created.id).await.unwrap(), 0);
        assert!(repo.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_id_matches_nothing() {
        let pool = repo_pool().await;
        let repo = CategoryRepo::new(&pool);

        let updated = repo
            .update(i32::MAX, CategoryName::new("Nope").unwrap())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
