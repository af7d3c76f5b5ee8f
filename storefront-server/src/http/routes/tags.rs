//! Tag endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::records::{Tag, TagWithProducts};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, Resource, ResourceId};
use crate::http::server::AppState;
use crate::models::TagName;

impl Resource for Tag {
    const NAME: &'static str = "tag";
}

const RESOURCE: &str = Tag::NAME;

#[derive(Deserialize)]
pub struct TagRequest {
    pub tag_name: Option<String>,
}

/// GET /api/tags
async fn list_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TagWithProducts>>, ApiError> {
    Ok(Json(state.catalog.list_tags().await?))
}

/// GET /api/tags/{id}
async fn get_tag(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Tag>,
) -> Result<Json<TagWithProducts>, ApiError> {
    let tag = state
        .catalog
        .get_tag(id)
        .await?
        .ok_or(ApiError::not_found(RESOURCE))?;
    Ok(Json(tag))
}

/// POST /api/tags
async fn create_tag(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<TagRequest>,
) -> Result<Json<Tag>, ApiError> {
    let name = TagName::required(req.tag_name.as_deref())?;
    Ok(Json(state.catalog.create_tag(name).await?))
}

/// PUT /api/tags/{id}
async fn update_tag(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Tag>,
    JsonBody(req): JsonBody<TagRequest>,
) -> Result<Json<Tag>, ApiError> {
    let name = TagName::required(req.tag_name.as_deref())?;
    let tag = state
        .catalog
        .update_tag(id, name)
        .await?
        .ok_or(ApiError::not_found(RESOURCE))?;
    Ok(Json(tag))
}

/// DELETE /api/tags/{id}
async fn delete_tag(
    State(state): State<Arc<AppState>>,
    ResourceId { id, .. }: ResourceId<Tag>,
) -> Result<Json<u64>, ApiError> {
    match state.catalog.delete_tag(id).await? {
        0 => Err(ApiError::not_found(RESOURCE)),
        deleted => Ok(Json(deleted)),
    }
}

/// Tag routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tags", get(list_tags).post(create_tag))
        .route(
            "/api/tags/{id}",
            get(get_tag).put(update_tag).delete(delete_tag),
        )
}
