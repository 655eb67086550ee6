use std::sync::Arc;

use hyper::StatusCode;
use serde_json::json;

use crate::helpers::{
    healthy_mongo, post_json, sample_realtime, spawn_app, spawn_mock_app, MockUpstream,
};
use gateway::provider::Error as ProviderError;

#[tokio::test]
async fn invalid_entries_are_dropped_not_surfaced() {
    let test_app = spawn_mock_app().await;

    let (status, body) = post_json(
        &test_app.app,
        "/weather/batch",
        json!({
            "locations": [{"city": "Paris"}, {"lat": 999, "lon": 0}],
            "units": "metric"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["location"]["name"], json!("Paris"));
}

#[tokio::test]
async fn empty_batch_is_rejected_before_any_upstream_call() {
    // No expectations set: any provider call would panic the test.
    let provider = MockUpstream::new();
    let test_app = spawn_app(Arc::new(provider), Arc::new(healthy_mongo())).await;

    let (status, body) = post_json(
        &test_app.app,
        "/weather/batch",
        json!({"locations": [], "units": "metric"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn oversized_batch_is_rejected_before_any_upstream_call() {
    let provider = MockUpstream::new();
    let test_app = spawn_app(Arc::new(provider), Arc::new(healthy_mongo())).await;

    let locations: Vec<_> = (0..11).map(|i| json!({"city": format!("City {i}")})).collect();
    let (status, body) = post_json(
        &test_app.app,
        "/weather/batch",
        json!({"locations": locations}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn all_failures_still_return_an_empty_success() {
    let mut provider = MockUpstream::new();
    provider
        .expect_realtime()
        .returning(|_, _| Err(ProviderError::LocationNotFound));
    let test_app = spawn_app(Arc::new(provider), Arc::new(healthy_mongo())).await;

    let (status, body) = post_json(
        &test_app.app,
        "/weather/batch",
        json!({"locations": [{"city": "Nowhere"}, {"city": "Elsewhere"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn successes_come_back_in_input_order() {
    let mut provider = MockUpstream::new();
    provider.expect_realtime().returning(|location, _| {
        let name = location.name.clone().unwrap_or_default();
        if name == "Fails" {
            Err(ProviderError::UpstreamServer(503))
        } else {
            Ok(sample_realtime(&name))
        }
    });
    let test_app = spawn_app(Arc::new(provider), Arc::new(healthy_mongo())).await;

    let (status, body) = post_json(
        &test_app.app,
        "/weather/batch",
        json!({"locations": [
            {"city": "Fails"},
            {"city": "Oslo"},
            {"city": "Lima"},
            {"city": "Fails"},
            {"city": "Cairo"}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    let names: Vec<_> = data
        .iter()
        .map(|entry| entry["location"]["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["Oslo", "Lima", "Cairo"]);
}

#[tokio::test]
async fn batch_entries_carry_the_essential_projection() {
    let test_app = spawn_mock_app().await;

    let (status, body) = post_json(
        &test_app.app,
        "/weather/batch",
        json!({"locations": [{"city": "Paris"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let entry = &body["data"][0];
    assert!(entry["temperature"].is_number());
    assert!(entry["windSpeed"].is_number());
    assert!(entry["windDirection"].is_number());
    assert!(entry["precipitationIntensity"].is_number());
    assert!(entry["condition"].is_string());
    assert!(entry["timestamp"].is_string());
    // the full projection's extra fields stay out of the batch shape
    assert!(entry.get("humidity").is_none());
    assert!(entry.get("pressure").is_none());
}
