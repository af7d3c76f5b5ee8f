//! Request helpers shared by the API tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use storefront_server::{build_router, Catalog, MemoryCatalog, ServerConfig};

pub struct TestApp {
    router: Router,
    pub catalog: Arc<MemoryCatalog>,
}

impl TestApp {
    pub fn new() -> Self {
        let catalog = Arc::new(MemoryCatalog::new());
        let dyn_catalog: Arc<dyn Catalog> = catalog.clone();
        Self {
            router: build_router(dyn_catalog, &ServerConfig::default()),
            catalog,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Send a raw (possibly invalid) JSON body.
    pub async fn request_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    /// Create a category and return its id.
    pub async fn category(&self, name: &str) -> i64 {
        let (status, body) = self
            .post("/api/categories", serde_json::json!({ "category_name": name }))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_i64().unwrap()
    }

    /// Create a tag and return its id.
    pub async fn tag(&self, name: &str) -> i64 {
        let (status, body) = self
            .post("/api/tags", serde_json::json!({ "tag_name": name }))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_i64().unwrap()
    }
}
