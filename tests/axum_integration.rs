use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::routing::post;
use edge_cors::constants::header;
use edge_cors::{CorsLayer, CorsOptions};
use tower::ServiceExt;

fn app() -> Router {
    Router::new()
        .route("/api", post(|body: String| async move { format!("query:{body}") }))
        .layer(CorsLayer::new(CorsOptions::api([
            "https://ok.com",
            "https://*.example.com",
        ])))
}

#[tokio::test]
async fn preflight_is_answered_by_the_layer() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api")
        .header(header::ORIGIN, "https://ok.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "Content-Type")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://ok.com");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn denied_preflight_still_returns_ok() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api")
        .header(header::ORIGIN, "https://ok.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
    assert!(response.headers().get(header::VARY).is_some());
}

#[tokio::test]
async fn disallowed_origin_reaches_handler_without_cors_headers() {
    let request = Request::builder()
        .method("POST")
        .uri("/api")
        .header(header::ORIGIN, "https://evil.com")
        .body(Body::from("{ block }"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
    assert_eq!(response.headers()[header::VARY], "Origin");
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"query:{ block }");
}

#[tokio::test]
async fn allowed_wildcard_origin_is_reflected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api")
        .header(header::ORIGIN, "https://wallet.example.com")
        .body(Body::from("{ block }"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://wallet.example.com"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}
