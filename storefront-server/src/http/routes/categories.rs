//! Category endpoints
//!
//! `/api/categories` and `/api/categories/{id}`. Reads embed each
//! category's products.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::records::{Category, CategoryWithProducts};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, Resource, ResourceId};
use crate::http::server::AppState;
use crate::models::CategoryName;

impl Resource for Category {
    const NAME: &'static str = "category";
}

const RESOURCE: &str = Category::NAME;

/// Create or rename request
#[derive(Deserialize)]
pub struct CategoryRequest {
    pub category_name: Option<String>,
}

/// GET /api/categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryWithProducts>>, ApiError> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
async fn get_category(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Category>,
) -> Result<Json<CategoryWithProducts>, ApiError> {
    let category = state
        .catalog
        .get_category(id)
        .await?
        .ok_or(ApiError::not_found(RESOURCE))?;
    Ok(Json(category))
}

/// POST /api/categories
async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let name = CategoryName::required(req.category_name.as_deref())?;
    let category = state.catalog.create_category(name).await?;

    tracing::info!(id = category.id, "category created");
    Ok(Json(category))
}

/// PUT /api/categories/{id}
async fn update_category(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Category>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let name = CategoryName::required(req.category_name.as_deref())?;
    let category = state
        .catalog
        .update_category(id, name)
        .await?
        .ok_or(ApiError::not_found(RESOURCE))?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
async fn delete_category(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Category>,
) -> Result<Json<u64>, ApiError> {
    match state.catalog.delete_category(id).await? {
        0 => Err(ApiError::not_found(RESOURCE)),
        deleted => {
            tracing::info!(id, "category deleted");
            Ok(Json(deleted))
        }
    }
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
