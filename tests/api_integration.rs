//! API integration tests
//!
//! Exercise `POST /url` and the delete endpoints through the full router,
//! including the JSON envelope and status codes clients rely on.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_app_with, json_request, memory_app, raw_request, BrokenStorage};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use urlalias::generator::ALPHABET;

#[tokio::test]
async fn test_save_with_generated_alias() {
    let app = memory_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert!(body.get("error").is_none());

    let alias = body["alias"].as_str().unwrap();
    assert_eq!(alias.len(), 6);
    assert!(alias.bytes().all(|b| ALPHABET.contains(&b)));
}

#[tokio::test]
async fn test_save_with_requested_alias() {
    let app = memory_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com", "alias": "ex" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "OK", "alias": "ex" })
    );
}

#[tokio::test]
async fn test_save_accepts_body_without_content_type() {
    let app = memory_app();

    let response = app
        .oneshot(raw_request(
            Method::POST,
            "/url",
            r#"{"url":"https://example.com","alias":"plain"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_save_duplicate_url_conflicts() {
    let app = memory_app();

    let first = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com", "alias": "ex" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com", "alias": "ex2" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(second).await,
        json!({ "status": "Error", "error": "url already exists" })
    );

    // No record was created for the second alias
    let lookup = app
        .oneshot(raw_request(Method::GET, "/ex2", ""))
        .await
        .unwrap();
    assert_eq!(lookup.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_duplicate_alias_conflicts() {
    let app = memory_app();

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://a.example", "alias": "taken" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://b.example", "alias": "taken" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "alias already exists");
}

#[tokio::test]
async fn test_save_rejects_bad_requests() {
    let app = memory_app();

    let cases = [
        (raw_request(Method::POST, "/url", ""), "empty request"),
        (
            raw_request(Method::POST, "/url", "{not json"),
            "failed to decode request",
        ),
        (
            json_request(Method::POST, "/url", json!({ "alias": "x" })),
            "field URL is a required field",
        ),
        (
            json_request(Method::POST, "/url", json!({ "url": "", "alias": "x" })),
            "field URL is a required field",
        ),
        (
            json_request(Method::POST, "/url", json!({ "url": "example.com" })),
            "field URL is not a valid URL",
        ),
        (
            json_request(Method::POST, "/url", json!({ "url": "https://exa\nmple.com" })),
            "field URL is not a valid URL",
        ),
        (
            json_request(Method::POST, "/url", json!({ "url": "https://exa\tmple.com" })),
            "field URL is not a valid URL",
        ),
        (
            json_request(Method::POST, "/url", json!({ "url": " https://example.com" })),
            "field URL is not a valid URL",
        ),
        (
            json_request(Method::POST, "/url", json!({ "url": "https://example.com " })),
            "field URL is not a valid URL",
        ),
    ];

    for (request, message) in cases {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{message}");
        assert_eq!(
            body_json(response).await,
            json!({ "status": "Error", "error": message })
        );
    }
}

#[tokio::test]
async fn test_save_rejects_unroutable_alias() {
    let app = memory_app();

    for alias in ["url", "a/b", "has space"] {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/url",
                json!({ "url": "https://example.com", "alias": alias }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "alias {alias}");
    }
}

#[tokio::test]
async fn test_delete_by_path() {
    let app = memory_app();

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com", "alias": "ex" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(raw_request(Method::DELETE, "/url/ex", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "OK", "alias": "ex" })
    );

    // Second delete reports the missing record as a conflict
    let again = app
        .oneshot(raw_request(Method::DELETE, "/url/ex", ""))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(again).await["error"], "url not found");
}

#[tokio::test]
async fn test_delete_by_body() {
    let app = memory_app();

    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com", "alias": "ex" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(Method::DELETE, "/url", json!({ "alias": "ex" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let missing = app
        .clone()
        .oneshot(json_request(Method::DELETE, "/url", json!({})))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(missing).await["error"],
        "alias is required for deletion"
    );

    let empty = app
        .oneshot(raw_request(Method::DELETE, "/url", ""))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(empty).await["error"], "empty request");
}

#[tokio::test]
async fn test_delete_unknown_alias() {
    let app = memory_app();

    let response = app
        .oneshot(raw_request(Method::DELETE, "/url/never-saved", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_store_failures_are_generic() {
    let app = create_app_with(Arc::new(BrokenStorage));

    let save = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com", "alias": "ex" }),
        ))
        .await
        .unwrap();
    assert_eq!(save.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(save).await;
    assert_eq!(body, json!({ "status": "Error", "error": "failed to add url" }));
    assert!(!body.to_string().contains("secret"));

    let delete = app
        .oneshot(raw_request(Method::DELETE, "/url/ex", ""))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(delete).await["error"], "failed to delete url");
}

#[tokio::test]
async fn test_padded_url_is_not_stored_as_distinct_duplicate() {
    let app = memory_app();

    let first = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": "https://example.com", "alias": "plain" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let padded = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/url",
            json!({ "url": " https://example.com", "alias": "padded" }),
        ))
        .await
        .unwrap();
    assert_eq!(padded.status(), StatusCode::BAD_REQUEST);

    let lookup = app
        .oneshot(raw_request(Method::GET, "/padded", ""))
        .await
        .unwrap();
    assert_eq!(lookup.status(), StatusCode::BAD_REQUEST);
}
