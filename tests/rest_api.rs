//! REST API Tests
//!
//! Drives the full router in-process:
//! - Create returns 201 with Location and alert headers
//! - Lists carry X-Total-Count and Link, filtered by query parameters
//! - Id rules, unknown filters and missing rows map to 4xx
//! - Deleting a referenced album is refused with 409

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use gallery::http_server::HttpServer;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    router.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(router: &Router, collection: &str, body: Value) -> Value {
    let response = send(router, "POST", &format!("/api/{}", collection), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

// =============================================================================
// Create and Lookup Tests
// =============================================================================

/// POST assigns an id and answers with Location and alert headers.
#[tokio::test]
async fn test_create_photo() {
    let router = HttpServer::new().router();

    let response = send(
        &router,
        "POST",
        "/api/photos",
        Some(json!({"title": "sunrise", "height": 10})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(
        response.headers()["x-galleryapp-alert"],
        "galleryApp.photo.created"
    );

    let photo = json_body(response).await;
    let id = photo["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/photos/{}", id));
    assert!(photo["uploaded"].is_string());
    assert!(photo["taken"].is_string());

    let fetched = send(&router, "GET", &location, None).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(json_body(fetched).await["title"], "sunrise");
}

/// A create body that already carries an id is a bad request.
#[tokio::test]
async fn test_create_with_id_rejected() {
    let router = HttpServer::new().router();

    let response = send(&router, "POST", "/api/tags", Some(json!({"id": 5, "name": "sea"}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "GALLERY_ID_EXISTS");
}

/// Unknown ids are 404 with an error body.
#[tokio::test]
async fn test_get_missing() {
    let router = HttpServer::new().router();

    let response = send(&router, "GET", "/api/albums/404", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "GALLERY_NOT_FOUND");
}

// =============================================================================
// Criteria Listing Tests
// =============================================================================

/// Filters, paging headers and count agree.
#[tokio::test]
async fn test_filtered_list_and_count() {
    let router = HttpServer::new().router();
    for (title, height) in [("a", 5), ("b", 10), ("c", 15), ("d", 20)] {
        create(&router, "photos", json!({"title": title, "height": height})).await;
    }

    let response = send(
        &router,
        "GET",
        "/api/photos?height.greaterThanOrEqual=10&size=1&sort=height,desc",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "3");

    let link = response.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(link.contains(
        "</api/photos?height.greaterThanOrEqual=10&sort=height,desc&page=1&size=1>; rel=\"next\""
    ));
    assert!(link.contains("page=2&size=1>; rel=\"last\""));

    let rows = json_body(response).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["title"], "d");

    let count = send(&router, "GET", "/api/photos/count?height.greaterThanOrEqual=10", None).await;
    assert_eq!(count.status(), StatusCode::OK);
    assert_eq!(json_body(count).await, json!(3));
}

/// Tag relation filters work through query parameters.
#[tokio::test]
async fn test_list_by_tag() {
    let router = HttpServer::new().router();
    let tag = create(&router, "tags", json!({"name": "nature"})).await;
    let tag_id = tag["id"].as_i64().unwrap();
    create(&router, "photos", json!({"title": "forest", "tagIds": [tag_id]})).await;
    create(&router, "photos", json!({"title": "street"})).await;

    let response = send(&router, "GET", &format!("/api/photos?tagId.equals={}", tag_id), None).await;
    let rows = json_body(response).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["title"], "forest");
}

/// Unknown fields and malformed operands are bad requests.
#[tokio::test]
async fn test_bad_filters_rejected() {
    let router = HttpServer::new().router();

    for uri in [
        "/api/photos?colour.equals=red",
        "/api/photos?height.equals=tall",
        "/api/photos?height.contains=1",
        "/api/photos?sort=colour",
        "/api/photos?page=-1",
    ] {
        let response = send(&router, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

// =============================================================================
// Update and Delete Tests
// =============================================================================

/// PATCH merges non-null fields; PUT replaces.
#[tokio::test]
async fn test_patch_and_put() {
    let router = HttpServer::new().router();
    let album = create(
        &router,
        "albums",
        json!({"title": "draft", "description": "keep me"}),
    )
    .await;
    let id = album["id"].as_i64().unwrap();
    let uri = format!("/api/albums/{}", id);

    let patched = send(&router, "PATCH", &uri, Some(json!({"id": id, "title": "final"}))).await;
    assert_eq!(patched.status(), StatusCode::OK);
    let patched = json_body(patched).await;
    assert_eq!(patched["title"], "final");
    assert_eq!(patched["description"], "keep me");

    let put = send(&router, "PUT", &uri, Some(json!({"id": id, "title": "replaced"}))).await;
    assert_eq!(put.status(), StatusCode::OK);
    assert!(json_body(put).await["description"].is_null());

    let mismatch = send(&router, "PUT", &uri, Some(json!({"id": id + 1, "title": "x"}))).await;
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);
}

/// Albums with photos cannot be deleted; empty ones can.
#[tokio::test]
async fn test_delete_referenced_album() {
    let router = HttpServer::new().router();
    let album = create(&router, "albums", json!({"title": "trip"})).await;
    let album_id = album["id"].as_i64().unwrap();
    let photo = create(&router, "photos", json!({"title": "p", "albumId": album_id})).await;

    let uri = format!("/api/albums/{}", album_id);
    let refused = send(&router, "DELETE", &uri, None).await;
    assert_eq!(refused.status(), StatusCode::CONFLICT);

    let photo_uri = format!("/api/photos/{}", photo["id"].as_i64().unwrap());
    let deleted = send(&router, "DELETE", &photo_uri, None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        deleted.headers()["x-galleryapp-alert"],
        "galleryApp.photo.deleted"
    );

    let deleted = send(&router, "DELETE", &uri, None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

/// A photo naming a missing album is refused.
#[tokio::test]
async fn test_dangling_album_reference() {
    let router = HttpServer::new().router();

    let response = send(
        &router,
        "POST",
        "/api/photos",
        Some(json!({"title": "p", "albumId": 999})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Management Tests
// =============================================================================

/// Metrics count writes and rejected requests.
#[tokio::test]
async fn test_management_metrics() {
    let router = HttpServer::new().router();
    create(&router, "tags", json!({"name": "sky"})).await;
    send(&router, "GET", "/api/tags?bogus.equals=1", None).await;

    let response = send(&router, "GET", "/management/metrics", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let metrics = json_body(response).await;
    assert_eq!(metrics["entities_saved"], 1);
    assert_eq!(metrics["requests_rejected"], 1);
}
