use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderValue, Method, Request, StatusCode, header},
};
use docrec::{
    CorpusIndex,
    corpus,
    server::{self, ErrorBody, HealthResponse, RecommendResponse},
};
use tower::ServiceExt;

const ORIGIN: &str = "http://localhost:3000";

const CORPUS_CSV: &str = "\
titles,summaries,terms
Neural Nets,deep learning basics,['cs.LG']
Ocean Tides,tidal patterns,['physics.ao-ph']
Garbage Collection,tracing collectors and reference counting,['cs.PL']
";

fn app() -> Router {
    let documents = corpus::read_csv(CORPUS_CSV.as_bytes()).unwrap();
    let index = Arc::new(CorpusIndex::build(documents).unwrap());
    server::router(index, HeaderValue::from_static(ORIGIN))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn recommend_returns_best_match() {
    let (status, body) = send(
        app(),
        post_json("/recommend", r#"{"query":"deep learning","top_n":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let resp: RecommendResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.recommendations.len(), 1);
    assert_eq!(resp.recommendations[0].title, "Neural Nets");
    assert_eq!(resp.recommendations[0].summary, "deep learning basics");
    assert_eq!(resp.recommendations[0].terms, "['cs.LG']");
}

#[tokio::test]
async fn recommend_with_trailing_slash() {
    let (status, body) = send(
        app(),
        post_json("/recommend/", r#"{"query":"tidal","top_n":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let resp: RecommendResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.recommendations[0].title, "Ocean Tides");
}

#[tokio::test]
async fn top_n_defaults_to_five() {
    let (status, body) =
        send(app(), post_json("/recommend", r#"{"query":"patterns"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let resp: RecommendResponse = serde_json::from_slice(&body).unwrap();
    // Only three documents exist, so all of them come back.
    assert_eq!(resp.recommendations.len(), 3);
}

#[tokio::test]
async fn top_n_beyond_corpus_returns_everything() {
    let (status, body) = send(
        app(),
        post_json("/recommend", r#"{"query":"learning","top_n":10}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let resp: RecommendResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.recommendations.len(), 3);
}

#[tokio::test]
async fn zero_top_n_is_bad_request() {
    let (status, body) = send(
        app(),
        post_json("/recommend", r#"{"query":"learning","top_n":0}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert!(err.error.contains("top_n"));
}

#[tokio::test]
async fn negative_top_n_is_bad_request() {
    let (status, _) = send(
        app(),
        post_json("/recommend", r#"{"query":"learning","top_n":-2}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_query_is_unprocessable() {
    let (status, body) =
        send(app(), post_json("/recommend", r#"{"top_n":3}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let err: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert!(!err.error.is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) =
        send(app(), post_json("/recommend", "{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert!(!err.error.is_empty());
}

#[tokio::test]
async fn wrong_content_type_is_unsupported_media_type() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/recommend")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"query":"tidal"}"#))
        .unwrap();
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let err: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert!(!err.error.is_empty());
}

#[tokio::test]
async fn empty_query_succeeds_in_corpus_order() {
    let (status, body) = send(
        app(),
        post_json("/recommend", r#"{"query":"","top_n":2}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let resp: RecommendResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.recommendations.len(), 2);
    assert_eq!(resp.recommendations[0].title, "Neural Nets");
    assert_eq!(resp.recommendations[1].title, "Ocean Tides");
}

#[tokio::test]
async fn identical_requests_give_identical_bodies() {
    let body = r#"{"query":"tracing patterns learning","top_n":3}"#;
    let (_, first) = send(app(), post_json("/recommend", body)).await;
    let (_, second) = send(app(), post_json("/recommend", body)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn health_reports_index_size() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.documents, 3);
    assert!(health.vocabulary > 0);
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/recommend")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(req).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ORIGIN
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn cors_echoes_configured_origin_on_requests() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/recommend")
        .header(header::ORIGIN, ORIGIN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"query":"tidal"}"#))
        .unwrap();
    let response = app().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        ORIGIN
    );
}

#[tokio::test]
async fn cors_ignores_other_origins() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/recommend")
        .header(header::ORIGIN, "http://evil.example")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"query":"tidal"}"#))
        .unwrap();
    let response = app().oneshot(req).await.unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
