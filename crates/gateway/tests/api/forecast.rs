use hyper::StatusCode;
use serde_json::json;

use crate::helpers::{get, spawn_mock_app};

#[tokio::test]
async fn hourly_forecast_returns_24_ordered_intervals() {
    let test_app = spawn_mock_app().await;

    let (status, body) = get(
        &test_app.app,
        "/weather/forecast?city=London&timesteps=1h&units=metric",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timestep"], json!("1h"));
    let intervals = body["data"]["intervals"].as_array().unwrap();
    assert_eq!(intervals.len(), 24);
    for pair in intervals.windows(2) {
        let earlier = pair[0]["time"].as_str().unwrap();
        let later = pair[1]["time"].as_str().unwrap();
        assert!(earlier < later, "intervals out of order: {earlier} >= {later}");
    }
    let first = &intervals[0];
    assert!(first["temperature"].is_number());
    assert!(first["feelsLike"].is_number());
    assert!(first.get("sunrise").is_none());
    assert!(!first["description"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn daily_forecast_returns_7_intervals_with_sun_times() {
    let test_app = spawn_mock_app().await;

    let (status, body) = get(&test_app.app, "/weather/forecast?city=London&timesteps=1d").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timestep"], json!("1d"));
    let intervals = body["data"]["intervals"].as_array().unwrap();
    assert_eq!(intervals.len(), 7);
    for interval in intervals {
        assert!(interval["sunrise"].is_string());
        assert!(interval["sunset"].is_string());
        assert!(interval["temperature"].is_number());
    }
}

#[tokio::test]
async fn forecast_defaults_to_hourly() {
    let test_app = spawn_mock_app().await;

    let (status, body) = get(&test_app.app, "/weather/forecast?city=London").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timestep"], json!("1h"));
}

#[tokio::test]
async fn unknown_timestep_is_rejected() {
    let test_app = spawn_mock_app().await;

    let (status, _body) = get(&test_app.app, "/weather/forecast?city=London&timesteps=1w").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forecast_requires_a_location() {
    let test_app = spawn_mock_app().await;

    let (status, body) = get(&test_app.app, "/weather/forecast").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["detail"],
        json!("Location must include coordinates or city name")
    );
}
