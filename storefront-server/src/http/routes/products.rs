//! Product endpoints
//!
//! Reads embed the product's category and tags. Create and update accept
//! `tag_ids` to set the product's tags in the same write.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::records::{Product, ProductDetail};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, Resource, ResourceId};
use crate::http::server::AppState;
use crate::models::{NewProduct, ProductChanges};

impl Resource for Product {
    const NAME: &'static str = "product";
}

const RESOURCE: &str = Product::NAME;

/// Create or update request; every field is optional at the wire level
/// and the required subset is enforced by [`NewProduct`].
#[derive(Deserialize, Default)]
pub struct ProductRequest {
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
    #[serde(alias = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
}

/// GET /api/products
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductDetail>>, ApiError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
async fn get_product(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Product>,
) -> Result<Json<ProductDetail>, ApiError> {
    let product = state
        .catalog
        .get_product(id)
        .await?
        .ok_or(ApiError::not_found(RESOURCE))?;
    Ok(Json(product))
}

/// POST /api/products
async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ProductRequest>,
) -> Result<Json<ProductDetail>, ApiError> {
    let new = NewProduct::new(
        req.product_name.as_deref(),
        req.price,
        req.stock,
        req.category_id,
        req.tag_ids,
    )?;
    let product = state.catalog.create_product(new).await?;

    tracing::info!(id = product.id, tags = product.tags.len(), "product created");
    Ok(Json(product))
}

/// PUT /api/products/{id}
async fn update_product(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Product>,
    JsonBody(req): JsonBody<ProductRequest>,
) -> Result<Json<ProductDetail>, ApiError> {
    let changes = ProductChanges::new(
        req.product_name.as_deref(),
        req.price,
        req.stock,
        req.category_id,
        req.tag_ids,
    )?;

    let product = state
        .catalog
        .update_product(id, changes)
        .await?
        .ok_or(ApiError::not_found(RESOURCE))?;
    Ok(Json(product))
}

/// DELETE /api/products/{id}
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Product>,
) -> Result<Json<u64>, ApiError> {
    match state.catalog.delete_product(id).await? {
        0 => Err(ApiError::not_found(RESOURCE)),
        deleted => {
            tracing::info!(id, "product deleted");
            Ok(Json(deleted))
        }
    }
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
