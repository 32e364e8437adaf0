use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use stuff_service::models::Item;
use stuff_service::services::{InMemoryItemStore, ItemStore};
use stuff_service::startup::{build_router, AppState};
use tower::util::ServiceExt;

fn router_over(store: &InMemoryItemStore) -> axum::Router {
    build_router(AppState::new(Arc::new(store.clone())))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

#[tokio::test]
async fn create_sets_location_from_host_header() {
    let store = InMemoryItemStore::new();
    let app = router_over(&store);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/stuff")
                .header(header::HOST, "stuff.example:9000")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"a","body":"b"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let body = body_json(response).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(location, format!("stuff.example:9000/stuff/{}", id));

    let stored = store.find_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.to_string(), id);
}

#[tokio::test]
async fn get_returns_seeded_item() {
    let store = InMemoryItemStore::new();
    let item = Item::new(Some("seeded".to_string()), None);
    store.insert(&item).await.unwrap();

    let response = router_over(&store)
        .oneshot(
            Request::builder()
                .uri(format!("/stuff/{}", item.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "id": item.id.to_string(), "title": "seeded" })
    );
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let store = InMemoryItemStore::new();

    let response = router_over(&store)
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/stuff/507f1f77bcf86cd799439011")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let store = InMemoryItemStore::new();

    let response = router_over(&store)
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
