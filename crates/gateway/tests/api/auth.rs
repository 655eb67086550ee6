use hyper::StatusCode;
use serde_json::json;

use crate::helpers::{
    access_token, get, get_with_headers, spawn_mock_app, token_with, TEST_JWT_SECRET,
};

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let test_app = spawn_mock_app().await;

    let (status, body) = get(&test_app.app, "/auth/me").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["detail"], json!("Authentication token required"));
}

#[tokio::test]
async fn valid_token_exposes_the_claims_unmodified() {
    let test_app = spawn_mock_app().await;
    let token = access_token();

    let (status, body) = get_with_headers(
        &test_app.app,
        "/auth/me",
        &[("authorization", format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sub"], json!("user-1"));
    assert_eq!(body["data"]["tokenType"], json!("access"));
    assert!(body["data"]["exp"].is_number());
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let test_app = spawn_mock_app().await;
    let token = token_with("some-other-secret", Some("access"), 3600);

    let (status, body) = get_with_headers(
        &test_app.app,
        "/auth/me",
        &[("authorization", format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["detail"], json!("Invalid authentication token"));
}

#[tokio::test]
async fn expired_token_gets_a_distinct_message() {
    let test_app = spawn_mock_app().await;
    let token = token_with(TEST_JWT_SECRET, Some("access"), -120);

    let (status, body) = get_with_headers(
        &test_app.app,
        "/auth/me",
        &[("authorization", format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["detail"], json!("Authentication token expired"));
}

#[tokio::test]
async fn malformed_token_gets_a_distinct_message() {
    let test_app = spawn_mock_app().await;

    let (status, body) = get_with_headers(
        &test_app.app,
        "/auth/me",
        &[("authorization", String::from("Bearer not.a.token"))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"]["detail"],
        json!("Malformed authentication token")
    );
}

#[tokio::test]
async fn refresh_token_on_an_access_endpoint_is_rejected() {
    let test_app = spawn_mock_app().await;
    let token = token_with(TEST_JWT_SECRET, Some("refresh"), 3600);

    let (status, body) = get_with_headers(
        &test_app.app,
        "/auth/me",
        &[("authorization", format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["detail"], json!("Invalid token type"));
}

#[tokio::test]
async fn missing_token_type_is_rejected_on_typed_endpoints() {
    let test_app = spawn_mock_app().await;
    let token = token_with(TEST_JWT_SECRET, None, 3600);

    let (status, body) = get_with_headers(
        &test_app.app,
        "/auth/me",
        &[("authorization", format!("Bearer {token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["detail"], json!("Invalid token type"));
}

#[tokio::test]
async fn token_is_accepted_from_the_query_parameter() {
    let test_app = spawn_mock_app().await;
    let token = access_token();

    let (status, body) = get(&test_app.app, &format!("/auth/me?token={token}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sub"], json!("user-1"));
}

#[tokio::test]
async fn token_is_accepted_from_the_cookie() {
    let test_app = spawn_mock_app().await;
    let token = access_token();

    let (status, body) = get_with_headers(
        &test_app.app,
        "/auth/me",
        &[("cookie", format!("theme=dark; access_token={token}"))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sub"], json!("user-1"));
}

#[tokio::test]
async fn header_takes_priority_over_a_valid_query_token() {
    let test_app = spawn_mock_app().await;
    let valid = access_token();

    let (status, _body) = get_with_headers(
        &test_app.app,
        &format!("/auth/me?token={valid}"),
        &[("authorization", String::from("Bearer garbage"))],
    )
    .await;

    // the bad header token is used and rejected; the query token is ignored
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn optional_auth_never_rejects_weather_requests() {
    let test_app = spawn_mock_app().await;

    let (status, _body) = get_with_headers(
        &test_app.app,
        "/weather/realtime?city=London",
        &[("authorization", String::from("Bearer garbage"))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}
