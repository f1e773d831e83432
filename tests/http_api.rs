mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use videodub_server::api;
use videodub_server::lifecycle::TransitionPolicy;

async fn app(policy: TransitionPolicy) -> Router {
    let (catalog, manager) = common::services(policy).await;
    api::router(catalog, manager)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

fn video_body() -> Value {
    json!({
        "filename": "a1b2c3.mp4",
        "original_filename": "keynote.mp4",
        "file_path": "uploads/a1b2c3.mp4",
        "file_size": 1024000,
        "duration": 3600,
        "mime_type": "video/mp4",
        "original_language": "en"
    })
}

#[tokio::test]
async fn health_responds() {
    let app = app(TransitionPolicy::Permissive).await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn video_registration_and_lookup() {
    let app = app(TransitionPolicy::Permissive).await;

    let (status, created) = send(&app, Method::POST, "/videos", Some(video_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["original_language"], "en");
    assert_eq!(created["file_size"], 1024000);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/videos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = send(&app, Method::GET, "/videos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/videos/555", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_video_metadata_is_a_bad_request() {
    let app = app(TransitionPolicy::Permissive).await;

    let mut body = video_body();
    body["original_language"] = json!("klingon");
    let (status, err) = send(&app, Method::POST, "/videos", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "VALIDATION_ERROR");

    let mut body = video_body();
    body["file_size"] = json!(0);
    let (status, err) = send(&app, Method::POST, "/videos", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn translation_flow_over_http() {
    let app = app(TransitionPolicy::Permissive).await;
    let (_, video) = send(&app, Method::POST, "/videos", Some(video_body())).await;
    let video_id = video["id"].as_i64().unwrap();
    let translations_uri = format!("/videos/{video_id}/translations");

    let (status, created) = send(
        &app,
        Method::POST,
        &translations_uri,
        Some(json!({ "target_language": "es" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["progress_percentage"], 0);
    assert_eq!(created["error_message"], Value::Null);
    let id = created["id"].as_i64().unwrap();

    let (status, duplicate) = send(
        &app,
        Method::POST,
        &translations_uri,
        Some(json!({ "target_language": "es" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(duplicate["code"], "DUPLICATE_TRANSLATION");

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/translations/{id}"),
        Some(json!({ "status": "processing", "progress_percentage": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "processing");
    assert_eq!(updated["progress_percentage"], 50);

    let (status, joined) = send(&app, Method::GET, &format!("/translations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(joined["id"], id);
    assert_eq!(joined["video"]["id"], video_id);

    let (status, pending) = send(&app, Method::GET, "/translations?status=pending", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(pending.as_array().unwrap().is_empty());

    let (_, all) = send(&app, Method::GET, "/translations", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (_, for_video) = send(&app, Method::GET, &translations_uri, None).await;
    assert_eq!(for_video.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn translation_errors_map_to_statuses() {
    let app = app(TransitionPolicy::Strict).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/videos/31/translations",
        Some(json!({ "target_language": "fr" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "VIDEO_NOT_FOUND");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/translations/31",
        Some(json!({ "progress_percentage": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (_, video) = send(&app, Method::POST, "/videos", Some(video_body())).await;
    let video_id = video["id"].as_i64().unwrap();
    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/videos/{video_id}/translations"),
        Some(json!({ "target_language": "fr" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/translations/{id}"),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/translations/{id}"),
        Some(json!({ "progress_percentage": 101 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unparseable_requests_use_the_json_error_body() {
    let app = app(TransitionPolicy::Permissive).await;
    let (_, video) = send(&app, Method::POST, "/videos", Some(video_body())).await;
    let video_id = video["id"].as_i64().unwrap();
    let (_, translation) = send(
        &app,
        Method::POST,
        &format!("/videos/{video_id}/translations"),
        Some(json!({ "target_language": "es" })),
    )
    .await;
    let translation_id = translation["id"].as_i64().unwrap();

    let cases = [
        (
            Method::PATCH,
            format!("/translations/{translation_id}"),
            Some(json!({ "progress_percentage": "half" })),
        ),
        (Method::GET, "/translations?status=bogus".to_string(), None),
        (Method::GET, "/videos/abc".to_string(), None),
        (Method::GET, "/translations/abc".to_string(), None),
        (Method::POST, "/videos".to_string(), Some(json!({ "filename": "x" }))),
        (
            Method::PATCH,
            format!("/translations/{translation_id}"),
            Some(json!({ "priority": 3 })),
        ),
    ];

    for (method, uri, body) in cases {
        let (status, response) = send(&app, method.clone(), &uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}: {response}");
        assert_eq!(response["code"], "VALIDATION_ERROR", "{method} {uri}");
        assert!(response["error"].is_string(), "{method} {uri}: {response}");
    }

    // Nothing was written by the rejected patches.
    let (_, stored) = send(&app, Method::GET, &format!("/translations/{translation_id}"), None).await;
    assert_eq!(stored["progress_percentage"], 0);
    assert_eq!(stored["updated_at"], translation["updated_at"]);
}

#[tokio::test]
async fn language_codes_are_exact_lowercase() {
    let app = app(TransitionPolicy::Permissive).await;
    let (_, video) = send(&app, Method::POST, "/videos", Some(video_body())).await;
    let uri = format!("/videos/{}/translations", video["id"].as_i64().unwrap());

    for code in ["ES", " es "] {
        let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "target_language": code }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code:?}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
    let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "target_language": "es" }))).await;
    assert_eq!(status, StatusCode::CREATED);
}
