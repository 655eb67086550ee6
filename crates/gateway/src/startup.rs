use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use hyper::Method;
use log::info;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    batch_weather, by_city, by_coordinates, forecast, health, index, me, ping,
    provider::WeatherProvider, realtime, realtime_post, routes, search, weather_health, AppError,
    Cli, JwtConfig, MockProvider, MongoAccess, MongoData, TomorrowClient,
};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    pub mongo: Arc<dyn MongoData>,
    pub jwt: JwtConfig,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::weather_routes::realtime,
        routes::weather_routes::realtime_post,
        routes::weather_routes::forecast,
        routes::weather_routes::batch_weather,
        routes::weather_routes::by_city,
        routes::weather_routes::by_coordinates,
        routes::weather_routes::search,
        routes::weather_routes::weather_health,
        routes::auth_routes::me,
        routes::health_routes::health,
        routes::health_routes::ping,
        routes::health_routes::index,
    ),
    components(
        schemas(
            crate::LocationQuery,
            crate::Location,
            crate::WeatherData,
            crate::CompactWeatherData,
            crate::EssentialWeather,
            crate::ForecastData,
            crate::ForecastInterval,
            routes::weather_routes::RealtimeBody,
            routes::weather_routes::BatchRequest,
            routes::weather_routes::UpstreamHealth,
            routes::health_routes::HealthReport,
            routes::health_routes::HealthChecks,
            routes::health_routes::ServiceInfo,
        )
    ),
    tags(
        (name = "weather gateway api", description = "a RESTful gateway that forwards weather queries to an upstream provider and normalizes the responses")
    )
)]
struct ApiDoc;

pub async fn build_app_state(cli: &Cli) -> Result<AppState, anyhow::Error> {
    let provider: Arc<dyn WeatherProvider> = if cli.use_mock_weather() {
        info!("mock weather mode enabled, upstream client disabled");
        Arc::new(MockProvider::new())
    } else {
        let api_key = cli.weather_api_key.clone().ok_or_else(|| {
            anyhow!("missing weather provider API key (--weather-api-key or WEATHER_API_KEY)")
        })?;
        Arc::new(
            TomorrowClient::new(cli.weather_base_url(), api_key)
                .map_err(|e| anyhow!("error building upstream client: {}", e))?,
        )
    };

    let secret = cli
        .jwt_secret
        .clone()
        .ok_or_else(|| anyhow!("missing JWT signing secret (--jwt-secret or JWT_SECRET)"))?;
    let jwt = JwtConfig {
        secret,
        default_expiry_secs: cli.jwt_expiry_secs(),
    };

    let mongo: Arc<dyn MongoData> = Arc::new(
        MongoAccess::connect(&cli.mongo_uri())
            .await
            .map_err(|e| anyhow!("error connecting to mongo: {}", e))?,
    );

    Ok(AppState {
        provider,
        mongo,
        jwt,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);
    Router::new()
        .route("/weather/realtime", get(realtime).post(realtime_post))
        .route("/weather/forecast", get(forecast))
        .route("/weather/batch", post(batch_weather))
        .route("/weather/locations/{city}", get(by_city))
        .route("/weather/coordinates/{lat}/{lon}", get(by_coordinates))
        .route("/weather/search/{query}", get(search))
        .route("/weather/health", get(weather_health))
        .route("/auth/me", get(me))
        .route("/health", get(health))
        .route("/ping", get(ping))
        .route("/", get(index))
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(Arc::new(app_state))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn not_found() -> AppError {
    AppError::NotFound(String::from("Route not found"))
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
