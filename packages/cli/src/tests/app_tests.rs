use crate::build_app;
use crate::config::{Config, Environment};
use atelier_catalog::DbState;
use atelier_storage::PoolSettings;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn test_config(cors_origin: &str) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        secret_key: "test-secret".to_string(),
        environment: Environment::Test,
        project_name: "Atelier Test".to_string(),
        api_v1_str: "/api/v2".to_string(),
        port: 8000,
        cors_origin: cors_origin.to_string(),
    }
}

async fn test_db() -> DbState {
    let settings = PoolSettings {
        max_connections: 1,
        ..PoolSettings::default()
    };
    DbState::init("sqlite::memory:", &settings).await.unwrap()
}

#[tokio::test]
async fn test_app_serves_health_and_prefixed_routes() {
    let config = test_config("*");
    let app = build_app(&config, test_db().await).unwrap();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["service"], "Atelier Test");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v2/suites").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/api/v1/suites").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trailing_slash_reaches_the_same_route() {
    let config = test_config("*");
    let app = build_app(&config, test_db().await).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v2/suites/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Bridal Suite"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v2/suites/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["items"][0]["name"], "Bridal Suite");

    let response = app
        .oneshot(Request::builder().uri("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let config = test_config("https://shop.example.com");
    let app = build_app(&config, test_db().await).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://shop.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://shop.example.com"
    );
}

#[tokio::test]
async fn test_invalid_cors_origin_is_rejected() {
    let config = test_config("bad\norigin");
    assert!(build_app(&config, test_db().await).is_err());
}
