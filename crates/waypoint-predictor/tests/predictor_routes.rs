//! End-to-end tests for the predictor router.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;
use waypoint_core::{Coefficients, ParsePolicy};
use waypoint_predictor::{router, Predictor};

const EXAMPLE_QUERY: &str = "area=1000&bedrooms=2&bathrooms=1&stories=2&mainroad=1&guestroom=0\
    &basement=1&hotwaterheating=0&airconditioning=1&parking=1&prefarea=1";

fn app(policy: ParsePolicy) -> axum::Router {
    router(Arc::new(Predictor::new(Coefficients::default(), policy)))
}

async fn send(policy: ParsePolicy, request: Request<Body>) -> Response {
    app(policy).oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_cors(response: &Response) {
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
}

#[tokio::test]
async fn test_get_reference_example() {
    let response = send(
        ParsePolicy::Lenient,
        Request::builder()
            .uri(format!("/?{}", EXAMPLE_QUERY))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(body_text(response).await, r#"{"predictedValue":875971}"#);
}

#[tokio::test]
async fn test_post_form_body() {
    let response = send(
        ParsePolicy::Lenient,
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(EXAMPLE_QUERY))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(body_text(response).await, r#"{"predictedValue":875971}"#);
}

#[tokio::test]
async fn test_post_with_query_only() {
    let response = send(
        ParsePolicy::Lenient,
        Request::builder()
            .method(Method::POST)
            .uri(format!("/?{}", EXAMPLE_QUERY))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(body_text(response).await, r#"{"predictedValue":875971}"#);
}

#[tokio::test]
async fn test_lenient_never_rejects() {
    let response = send(
        ParsePolicy::Lenient,
        Request::builder()
            .uri("/?area=lots&bedrooms=many")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, r#"{"predictedValue":0}"#);
}

#[tokio::test]
async fn test_strict_rejects_with_cors() {
    let response = send(
        ParsePolicy::Strict,
        Request::builder()
            .uri("/?area=lots")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_eq!(body_text(response).await, "invalid area: \"lots\"\n");
}

#[tokio::test]
async fn test_strict_accepts_complete_input() {
    let response = send(
        ParsePolicy::Strict,
        Request::builder()
            .uri(format!("/?{}", EXAMPLE_QUERY))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unsupported_method_keeps_cors() {
    let response = send(
        ParsePolicy::Lenient,
        Request::builder()
            .method(Method::DELETE)
            .uri("/")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&response);
}
