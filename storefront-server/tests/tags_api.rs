//! `/api/tags` contract and the seeded catalog over HTTP

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;
use storefront_server::seeds;

#[tokio::test]
async fn tag_crud() {
    let app = TestApp::new();

    let (status, created) = app.post("/api/tags", json!({ "tag_name": "blue" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, json!({ "id": 1, "tag_name": "blue" }));

    let (status, body) = app.get("/api/tags/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "tag_name": "blue", "products": [] }));

    let (status, body) = app.put("/api/tags/1", json!({ "tag_name": "navy" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tag_name"], "navy");

    let (status, body) = app.delete("/api/tags/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(1));

    let (status, body) = app.get("/api/tags/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No tag found using this id");
}

#[tokio::test]
async fn missing_tag_is_404_for_writes() {
    let app = TestApp::new();
    let blue = app.tag("blue").await;

    let (status, body) = app.put("/api/tags/99", json!({ "tag_name": "navy" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No tag found using this id");

    let (status, body) = app.delete("/api/tags/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = app.delete("/api/tags/4294967296").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The existing tag is untouched
    let (_, body) = app.get(&format!("/api/tags/{blue}")).await;
    assert_eq!(body["tag_name"], "blue");
}

#[tokio::test]
async fn tag_name_required() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/tags", json!({ "name": "wrong field" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "tag_name is required");
}

#[tokio::test]
async fn deleting_tag_keeps_products() {
    let app = TestApp::new();
    let red = app.tag("red").await;
    let (_, product) = app
        .post(
            "/api/products",
            json!({ "product_name": "Red Hat", "price": "8", "tag_ids": [red] }),
        )
        .await;
    let product_id = product["id"].as_i64().unwrap();

    let (status, _) = app.delete(&format!("/api/tags/{red}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/products/{product_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn seeded_catalog_served() {
    let app = TestApp::new();
    seeds::seed(app.catalog.as_ref(), false).await.unwrap();

    let (status, tags) = app.get("/api/tags").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tags.as_array().unwrap().len(), 8);

    // "rock music" is on the hat and the vinyl record
    let rock: Vec<&str> = tags[0]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["product_name"].as_str().unwrap())
        .collect();
    assert_eq!(
        rock,
        vec!["Branded Baseball Hat", "Top 40 Music Compilation Vinyl Record"]
    );

    let (_, music) = app.get("/api/categories/3").await;
    assert_eq!(music["category_name"], "Music");
    assert_eq!(music["products"][0]["price"], "12.99");
}

#[tokio::test]
async fn health_reports_store() {
    let app = TestApp::new();

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "reachable");
}
