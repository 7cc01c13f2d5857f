mod common;

use axum::body::{Body, to_bytes};
use common::{MockMediaServer, api_key_config, collection, harness, movie};
use embox::router;
use embox_configuration::EmbyConfig;
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_owned());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, serde_json::from_slice(&body).unwrap())
}

fn upstream() -> MockMediaServer {
    MockMediaServer::new()
        .with_items(vec![movie("m1", "Heat", Some(1995), Some(7.9))], 1)
        .with_views(vec![collection("1", "Movies", Some("movies"))])
}

#[tokio::test]
async fn test_list_route() {
    let h = harness(Some(api_key_config()), upstream());
    let app = router(h.service.clone(), "/api/emby");

    let (status, content_type, body) =
        get(app, "/api/emby/list?page=2&pageSize=10&parentId=lib").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body["success"], true);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["total"], 1);
    assert_eq!(body["list"][0]["mediaType"], "movie");

    let query = h.upstream.last_query().expect("items was called");
    assert_eq!(query.parent_id.as_deref(), Some("lib"));
    assert_eq!(query.start_index, Some(10));
    assert_eq!(query.limit, Some(10));
}

#[tokio::test]
async fn test_malformed_query_uses_defaults() {
    let h = harness(Some(api_key_config()), upstream());
    let app = router(h.service.clone(), "/api/emby");

    let (status, _, body) = get(app, "/api/emby/list?page=-4&pageSize=lots&page=9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPage"], 1);
    let query = h.upstream.last_query().expect("items was called");
    assert_eq!(query.start_index, Some(0));
    assert_eq!(query.limit, Some(20));
}

#[tokio::test]
async fn test_views_route() {
    let h = harness(Some(api_key_config()), upstream());
    let app = router(h.service.clone(), "/api/emby/");

    let (status, content_type, body) = get(app, "/api/emby/views").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        serde_json::json!({
            "success": true,
            "views": [{ "id": "1", "name": "Movies", "type": "movies" }]
        })
    );
}

#[tokio::test]
async fn test_errors_are_still_ok() {
    let config = EmbyConfig {
        enabled: false,
        ..api_key_config()
    };
    let h = harness(Some(config), upstream());
    let app = router(h.service.clone(), "/api/emby");

    let (status, _, body) = get(app.clone(), "/api/emby/list?page=4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Emby is not configured or not enabled",
            "list": [],
            "totalPages": 0,
            "currentPage": 4,
            "total": 0
        })
    );

    let (status, _, body) = get(app, "/api/emby/views").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Emby is not configured or not enabled",
            "views": []
        })
    );
}

#[tokio::test]
async fn test_empty_prefix_mounts_at_root() {
    let h = harness(Some(api_key_config()), upstream());

    let (status, _, body) = get(router(h.service.clone(), ""), "/views").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let response = router(h.service.clone(), "")
        .oneshot(
            Request::get("/api/emby/views")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
