//! Tag repository

use sqlx::{PgPool, Row};

use crate::db::records::{attach_tag_products, Product, Tag, TagWithProducts};
use crate::db::DbError;
use crate::models::TagName;

/// Tag repository
pub struct TagRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TagRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TagWithProducts>, DbError> {
        let tags: Vec<Tag> = sqlx::query_as("SELECT id, tag_name FROM tags ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        self.with_products(tags).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<TagWithProducts>, DbError> {
        let tag: Option<Tag> = sqlx::query_as("SELECT id, tag_name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let Some(tag) = tag else {
            return Ok(None);
        };

        Ok(self.with_products(vec![tag]).await?.pop())
    }

    pub async fn create(&self, name: TagName) -> Result<Tag, DbError> {
        let tag = sqlx::query_as("INSERT INTO tags (tag_name) VALUES ($1) RETURNING id, tag_name")
            .bind(name.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(tag)
    }

    pub async fn update(&self, id: i32, name: TagName) -> Result<Option<Tag>, DbError> {
        let tag = sqlx::query_as(
            "UPDATE tags SET tag_name = $2 WHERE id = $1 RETURNING id, tag_name",
        )
        .bind(id)
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(tag)
    }

    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Products for `tags` via the join table, one query.
    async fn with_products(&self, tags: Vec<Tag>) -> Result<Vec<TagWithProducts>, DbError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = tags.iter().map(|t| t.id).collect();
        let links = sqlx::query(
            r#"
            SELECT pt.tag_id, p.id, p.product_name, p.price, p.stock, p.category_id
            FROM product_tags pt
            JOIN products p ON p.id = pt.product_id
            WHERE pt.tag_id = ANY($1)
            ORDER BY p.id
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|r| {
            (
                r.get::<i32, _>("tag_id"),
                Product {
                    id: r.get("id"),
                    product_name: r.get("product_name"),
                    price: r.get("price"),
                    stock: r.get("stock"),
                    category_id: r.get("category_id"),
                },
            )
        })
        .collect();

        Ok(attach_tag_products(tags, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::ProductRepo;
    use crate::db::{create_pool, migrations};
    use crate::models::NewProduct;

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
        let repo = TagRepo::new(&pool);

        let created = repo.create(TagName::new("repo-tag-crud").unwrap()).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.tag_name, "repo-tag-crud");
        assert!(fetched.products.is_empty());

        let renamed = repo
            .update(created.id, TagName::new("repo-tag-renamed").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.tag_name, "repo-tag-renamed");

        assert_eq!(repo.delete(created.id).await.unwrap(), 1);
        assert_eq!(repo.delete(created.id).await.unwrap(), 0);
        assert!(repo.get(created.id).await.unwrap().is_none());
        assert!(repo
            .update(created.id, TagName::new("gone").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_cascades_to_product_links() {
        let pool = repo_pool().await;
        let repo = TagRepo::new(&pool);
        let tag = repo.create(TagName::new("repo-cascade").unwrap()).await.unwrap();

        let products = ProductRepo::new(&pool);
        let product = products
            .create(
                NewProduct::new(
                    Some("Repo Vinyl"),
                    Some("12.99".parse().unwrap()),
                    None,
                    None,
                    Some(vec![tag.id]),
                )
                .unwrap(),
            )
            .await
            .unwrap();

        let nested = repo.get(tag.id).await.unwrap().unwrap();
        let ids: Vec<i32> = nested.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![product.id]);

        assert_eq!(repo.delete(tag.id).await.unwrap(), 1);

        let links: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product_tags WHERE tag_id = $1")
            .bind(tag.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(links.0, 0);

        let survivor = products.get(product.id).await.unwrap().unwrap();
        assert!(survivor.tags.is_empty());

        products.delete(product.id).await.unwrap();
    }
}
