//! Product repository
//!
//! Handles product CRUD with:
//! - Category and tags loaded with one `ANY($1)` query each
//! - Atomic writes of a product together with its `product_tags` rows

use sqlx::{PgConnection, PgPool, Row};

use crate::db::records::{
    attach_category_and_tags, referenced_categories, Category, Product, ProductDetail, Tag,
};
use crate::db::DbError;
use crate::models::{NewProduct, ProductChanges, TagIds};

const PRODUCT_COLUMNS: &str = "id, product_name, price, stock, category_id";

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ProductDetail>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let products: Vec<Product> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&mut *conn)
        .await?;

        load_details(&mut conn, products).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<ProductDetail>, DbError> {
        let mut conn = self.pool.acquire().await?;
        get_detail(&mut conn, id).await
    }

    /// Insert a product and its tag links in one transaction.
    pub async fn create(&self, new: NewProduct) -> Result<ProductDetail, DbError> {
        let mut tx = self.pool.begin().await?;

        let product: Product = sqlx::query_as(&format!(
            r#"
            INSERT INTO products (product_name, price, stock, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(new.product_name.as_str())
        .bind(new.price.value())
        .bind(new.stock.value())
        .bind(new.category_id)
        .fetch_one(&mut *tx)
        .await?;

        link_tags(&mut tx, product.id, &new.tag_ids).await?;

        let mut details = load_details(&mut tx, vec![product]).await?;
        tx.commit().await?;

        details.pop().ok_or_else(|| DbError::Sqlx(sqlx::Error::RowNotFound))
    }

    /// Apply a partial update. `None` when no row has this id.
    ///
    /// Absent columns keep their value; a present tag set replaces the
    /// product's links entirely.
    pub async fn update(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<Option<ProductDetail>, DbError> {
        let mut tx = self.pool.begin().await?;

        let product: Option<Product> = sqlx::query_as(&format!(
            r#"
            UPDATE products SET
                product_name = COALESCE($2, product_name),
                price = COALESCE($3, price),
                stock = COALESCE($4, stock),
                category_id = COALESCE($5, category_id)
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.product_name.as_ref().map(|n| n.as_str()))
        .bind(changes.price.map(|p| p.value()))
        .bind(changes.stock.map(|s| s.value()))
        .bind(changes.category_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(product) = product else {
            return Ok(None);
        };

        if let Some(tag_ids) = &changes.tag_ids {
            sqlx::query(
                r#"
                DELETE FROM product_tags
                WHERE product_id = $1 AND NOT (tag_id = ANY($2))
                "#,
            )
            .bind(id)
            .bind(tag_ids.as_slice())
            .execute(&mut *tx)
            .await?;

            link_tags(&mut tx, id, tag_ids).await?;
        }

        let mut details = load_details(&mut tx, vec![product]).await?;
        tx.commit().await?;

        Ok(details.pop())
    }

    /// Delete a product, returning the number of rows removed.
    /// Its tag links go with it.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

async fn get_detail(conn: &mut PgConnection, id: i32) -> Result<Option<ProductDetail>, DbError> {
    let product: Option<Product> = sqlx::query_as(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(product) = product else {
        return Ok(None);
    };

    Ok(load_details(conn, vec![product]).await?.pop())
}

/// Insert missing `product_tags` rows for `product_id`.
async fn link_tags(conn: &mut PgConnection, product_id: i32, tag_ids: &TagIds) -> Result<(), DbError> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO product_tags (product_id, tag_id)
        SELECT $1, UNNEST($2::int[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(product_id)
    .bind(tag_ids.as_slice())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Fetch categories and tags for `products` and assemble the details.
async fn load_details(
    conn: &mut PgConnection,
    products: Vec<Product>,
) -> Result<Vec<ProductDetail>, DbError> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let category_ids = referenced_categories(&products);
    let categories: Vec<Category> = if category_ids.is_empty() {
        Vec::new()
    } else {
        sqlx::query_as("SELECT id, category_name FROM categories WHERE id = ANY($1)")
            .bind(&category_ids)
            .fetch_all(&mut *conn)
            .await?
    };

    let product_ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let links = sqlx::query(
        r#"
        SELECT pt.product_id, t.id, t.tag_name
        FROM product_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.product_id = ANY($1)
        ORDER BY t.id
        "#,
    )
    .bind(&product_ids)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|r| {
        (
            r.get::<i32, _>("product_id"),
            Tag {
                id: r.get("id"),
                tag_name: r.get("tag_name"),
            },
        )
    })
    .collect();

    Ok(attach_category_and_tags(products, categories, links))
}
