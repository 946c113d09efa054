#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use prod_timeline::config::TimelineSettings;
use prod_timeline::db::repositories::LocalRepository;
use prod_timeline::db::repository::ScheduledItemRepository;
use prod_timeline::http::{create_router, AppState};
use serde_json::{json, Value};
use support::{d, shop_floor_repo};
use tower::ServiceExt;

fn app_with(repo: &LocalRepository) -> Router {
    let repo = Arc::new(repo.clone()) as Arc<dyn ScheduledItemRepository>;
    create_router(AppState::new(repo, TimelineSettings::default()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put_dates(id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri(format!("/v1/items/{}/dates", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_items() {
    let (status, json) = send(app_with(&shop_floor_repo()), get("/v1/items")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 5);
    assert_eq!(json["scheduled"], 4);
    assert_eq!(json["items"][0]["id"], "wo-100");
    assert_eq!(json["items"][0]["start_date"], "2024-01-02");
}

#[tokio::test]
async fn test_get_missing_item_is_404() {
    let (status, json) = send(app_with(&shop_floor_repo()), get("/v1/items/wo-999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_timeline_for_window() {
    let (status, json) = send(
        app_with(&shop_floor_repo()),
        get("/v1/timeline?start=2024-01-01&weeks=4"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["window_start"], "2024-01-01");
    assert_eq!(json["window_end"], "2024-01-28");
    assert_eq!(json["lane_count"], 2);
    assert_eq!(json["bars"].as_array().unwrap().len(), 3);
    assert_eq!(json["hidden_count"], 1);
    assert_eq!(json["unscheduled"], json!(["wo-103"]));
}

#[tokio::test]
async fn test_timeline_rejects_bad_query() {
    let (status, _) = send(
        app_with(&shop_floor_repo()),
        get("/v1/timeline?start=next-tuesday"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app_with(&shop_floor_repo()),
        get("/v1/timeline?start=2024-01-01&weeks=0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_timeline_unavailable_repository() {
    let repo = shop_floor_repo();
    repo.set_healthy(false);
    let (status, json) = send(app_with(&repo), get("/v1/timeline?start=2024-01-01")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "UNAVAILABLE");
}

#[tokio::test]
async fn test_update_dates_persists() {
    let repo = shop_floor_repo();
    let (status, json) = send(
        app_with(&repo),
        put_dates("wo-103", json!({"start_date": "2024-01-15", "end_date": "2024-01-17"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["end_date"], "2024-01-17");

    let stored = repo.get_scheduled_item(&"wo-103".into()).await.unwrap();
    assert_eq!(stored.start_date, Some(d(2024, 1, 15)));
    assert_eq!(repo.update_count(), 1);
}

#[tokio::test]
async fn test_update_inverted_range_is_400() {
    let repo = shop_floor_repo();
    let (status, json) = send(
        app_with(&repo),
        put_dates("wo-100", json!({"start_date": "2024-01-09", "end_date": "2024-01-02"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(repo.update_count(), 0);
}

#[tokio::test]
async fn test_update_unknown_item_is_404() {
    let (status, _) = send(
        app_with(&shop_floor_repo()),
        put_dates("wo-999", json!({"start_date": "2024-01-01", "end_date": "2024-01-02"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
