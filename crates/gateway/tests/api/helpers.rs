use std::sync::{Arc, Once};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::Request,
    Router,
};
use hyper::{header, Method, StatusCode};
use log::LevelFilter;
use mockall::mock;
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;

use gateway::{
    app,
    db::Error as DbError,
    provider::{
        ApiLocation, Error as ProviderError, ForecastResponse, RealtimeData, RealtimeResponse,
        RealtimeValues,
    },
    setup_logger, sign_token, AppState, DecodedToken, JwtConfig, Location, MockProvider,
    MongoData, Timestep, Units, WeatherProvider,
};

pub const TEST_JWT_SECRET: &str = "gateway-test-secret";

pub struct TestApp {
    pub app: Router,
}

static INIT_LOGGER: Once = Once::new();
fn init_logger() {
    INIT_LOGGER.call_once(|| {
        setup_logger().level(LevelFilter::Debug).apply().unwrap();
    });
}

mock! {
    pub Upstream {}

    #[async_trait]
    impl WeatherProvider for Upstream {
        async fn realtime(&self, location: &Location, units: Units) -> Result<RealtimeResponse, ProviderError>;
        async fn forecast(
            &self,
            location: &Location,
            units: Units,
            timestep: Timestep,
        ) -> Result<ForecastResponse, ProviderError>;
        async fn search_locations(&self, query: &str, limit: usize) -> Result<Vec<Location>, ProviderError>;
        async fn check_health(&self) -> bool;
    }
}

mock! {
    pub Mongo {}

    #[async_trait]
    impl MongoData for Mongo {
        async fn ping(&self) -> Result<(), DbError>;
    }
}

pub fn healthy_mongo() -> MockMongo {
    let mut mongo = MockMongo::new();
    mongo.expect_ping().returning(|| Ok(()));
    mongo
}

pub fn failing_mongo() -> MockMongo {
    let mut mongo = MockMongo::new();
    mongo
        .expect_ping()
        .returning(|| Err(DbError::Driver(mongodb::error::Error::custom("down"))));
    mongo
}

pub async fn spawn_app(provider: Arc<dyn WeatherProvider>, mongo: Arc<dyn MongoData>) -> TestApp {
    init_logger();
    let app_state = AppState {
        provider,
        mongo,
        jwt: JwtConfig {
            secret: String::from(TEST_JWT_SECRET),
            default_expiry_secs: 3600,
        },
    };
    TestApp {
        app: app(app_state),
    }
}

/// App wired with the product mock provider, as a deployment running in mock
/// mode would be.
pub async fn spawn_mock_app() -> TestApp {
    spawn_app(Arc::new(MockProvider::new()), Arc::new(healthy_mongo())).await
}

pub fn sample_realtime(name: &str) -> RealtimeResponse {
    RealtimeResponse {
        data: RealtimeData {
            time: OffsetDateTime::now_utc(),
            values: RealtimeValues {
                temperature: Some(21.4567),
                temperature_apparent: Some(20.9),
                humidity: Some(64.333),
                wind_speed: Some(4.789),
                wind_direction: Some(182.6),
                precipitation_intensity: Some(0.1234),
                precipitation_probability: Some(34.7),
                visibility: Some(14.05),
                uv_index: Some(3.14),
                cloud_cover: Some(55.49),
                pressure_surface_level: Some(1013.27),
                weather_code: Some(1100),
            },
        },
        location: ApiLocation {
            lat: Some(48.8566),
            lon: Some(2.3522),
            name: Some(name.to_owned()),
            kind: None,
        },
    }
}

pub fn token_with(secret: &str, token_type: Option<&str>, expires_in_secs: i64) -> String {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = DecodedToken {
        exp: now + expires_in_secs,
        iat: Some(now),
        sub: Some(String::from("user-1")),
        token_type: token_type.map(str::to_owned),
        ..Default::default()
    };
    sign_token(&claims, secret).unwrap()
}

pub fn access_token() -> String {
    token_with(TEST_JWT_SECRET, Some("access"), 3600)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_with_headers(
    app: &Router,
    uri: &str,
    headers: &[(&str, String)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value.as_str());
    }
    let request = builder.body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
