use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use hyper::StatusCode;
use log::debug;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};

use crate::{
    batch::fetch_batch, location, weather::normalize, ApiResponse, AppError, AppState,
    CompactWeatherData, EssentialWeather, ForecastData, Format, Location, LocationQuery,
    OptionalJwtAuth, Timestep, Units, WeatherData,
};

async fn fetch_realtime(
    state: &AppState,
    query: &LocationQuery,
    units: Units,
) -> Result<WeatherData, AppError> {
    let location = location::resolve(query)?;
    let payload = state.provider.realtime(&location, units).await?;
    Ok(normalize::realtime(payload, location).sanitized())
}

async fn fetch_forecast(
    state: &AppState,
    query: &LocationQuery,
    units: Units,
    timestep: Timestep,
) -> Result<ForecastData, AppError> {
    let location = location::resolve(query)?;
    let payload = state.provider.forecast(&location, units, timestep).await?;
    Ok(normalize::forecast(payload, location, timestep)?)
}

/// Either projection of a realtime snapshot, selected by `format`.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RealtimeView {
    Full(WeatherData),
    Compact(CompactWeatherData),
}

fn project(weather: WeatherData, format: Format) -> RealtimeView {
    match format {
        Format::Full => RealtimeView::Full(weather),
        Format::Compact => RealtimeView::Compact(weather.compact()),
    }
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct RealtimeParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub units: Units,
}

impl RealtimeParams {
    fn location_query(&self) -> LocationQuery {
        LocationQuery {
            lat: self.lat,
            lon: self.lon,
            city: self.city.clone(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/weather/realtime",
    params(RealtimeParams),
    responses(
        (status = OK, description = "Current conditions for the location", body = WeatherData),
        (status = BAD_REQUEST, description = "Missing or out-of-range location"),
        (status = NOT_FOUND, description = "Location could not be resolved upstream")
    ))]
pub async fn realtime(
    State(state): State<Arc<AppState>>,
    OptionalJwtAuth(auth): OptionalJwtAuth,
    Query(params): Query<RealtimeParams>,
) -> Result<Json<ApiResponse<RealtimeView>>, AppError> {
    if let Some(auth) = &auth {
        debug!(
            "authenticated realtime request from {}",
            auth.claims.sub.as_deref().unwrap_or("unknown subject")
        );
    }
    let weather = fetch_realtime(&state, &params.location_query(), params.units).await?;
    Ok(ApiResponse::ok(project(weather, params.format)))
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct RealtimeBody {
    pub location: LocationQuery,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub units: Units,
}

#[utoipa::path(
    post,
    path = "/weather/realtime",
    request_body = RealtimeBody,
    responses(
        (status = OK, description = "Current conditions for the location", body = WeatherData),
        (status = BAD_REQUEST, description = "Missing or out-of-range location")
    ))]
pub async fn realtime_post(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RealtimeBody>,
) -> Result<Json<ApiResponse<RealtimeView>>, AppError> {
    let weather = fetch_realtime(&state, &body.location, body.units).await?;
    Ok(ApiResponse::ok(project(weather, body.format)))
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct ForecastParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    #[serde(default)]
    pub timesteps: Timestep,
    #[serde(default)]
    pub units: Units,
}

#[utoipa::path(
    get,
    path = "/weather/forecast",
    params(ForecastParams),
    responses(
        (status = OK, description = "Hourly or daily forecast for the location", body = ForecastData),
        (status = BAD_REQUEST, description = "Missing or out-of-range location")
    ))]
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ApiResponse<ForecastData>>, AppError> {
    let query = LocationQuery {
        lat: params.lat,
        lon: params.lon,
        city: params.city.clone(),
    };
    let forecast = fetch_forecast(&state, &query, params.units, params.timesteps).await?;
    Ok(ApiResponse::ok(forecast))
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct BatchRequest {
    pub locations: Vec<LocationQuery>,
    #[serde(default)]
    pub units: Units,
}

#[utoipa::path(
    post,
    path = "/weather/batch",
    request_body = BatchRequest,
    responses(
        (status = OK, description = "Snapshots for every location that could be fetched", body = Vec<EssentialWeather>),
        (status = BAD_REQUEST, description = "Empty batch or more than 10 locations")
    ))]
pub async fn batch_weather(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchRequest>,
) -> Result<Json<ApiResponse<Vec<EssentialWeather>>>, AppError> {
    let results = fetch_batch(state.provider.clone(), &body.locations, body.units).await?;
    Ok(ApiResponse::ok(results))
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct UnitsParams {
    #[serde(default)]
    pub units: Units,
}

#[utoipa::path(
    get,
    path = "/weather/locations/{city}",
    params(
        ("city" = String, Path, description = "City name, at least 2 characters"),
        UnitsParams
    ),
    responses(
        (status = OK, description = "Current conditions for the city", body = WeatherData),
        (status = NOT_FOUND, description = "Location could not be resolved upstream")
    ))]
pub async fn by_city(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
    Query(params): Query<UnitsParams>,
) -> Result<Json<ApiResponse<WeatherData>>, AppError> {
    let query = LocationQuery {
        lat: None,
        lon: None,
        city: Some(city),
    };
    let weather = fetch_realtime(&state, &query, params.units).await?;
    Ok(ApiResponse::ok(weather))
}

#[utoipa::path(
    get,
    path = "/weather/coordinates/{lat}/{lon}",
    params(
        ("lat" = f64, Path, description = "Latitude, -90 to 90"),
        ("lon" = f64, Path, description = "Longitude, -180 to 180"),
        UnitsParams
    ),
    responses(
        (status = OK, description = "Current conditions at the coordinates", body = WeatherData),
        (status = BAD_REQUEST, description = "Coordinates out of range")
    ))]
pub async fn by_coordinates(
    State(state): State<Arc<AppState>>,
    Path((lat, lon)): Path<(f64, f64)>,
    Query(params): Query<UnitsParams>,
) -> Result<Json<ApiResponse<WeatherData>>, AppError> {
    let query = LocationQuery {
        lat: Some(lat),
        lon: Some(lon),
        city: None,
    };
    let weather = fetch_realtime(&state, &query, params.units).await?;
    Ok(ApiResponse::ok(weather))
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct SearchParams {
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/weather/search/{query}",
    params(
        ("query" = String, Path, description = "Free-text location search, at least 2 characters"),
        SearchParams
    ),
    responses(
        (status = OK, description = "Locations matching the query", body = Vec<Location>),
        (status = BAD_REQUEST, description = "Query too short or limit out of range")
    ))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<Location>>>, AppError> {
    let query = query.trim();
    if query.chars().count() < 2 {
        return Err(AppError::Validation(String::from(
            "Search query must be at least 2 characters",
        )));
    }
    let limit = params.limit.unwrap_or(5);
    if !(1..=10).contains(&limit) {
        return Err(AppError::Validation(String::from(
            "Limit must be between 1 and 10",
        )));
    }
    let matches = state.provider.search_locations(query, limit).await?;
    Ok(ApiResponse::ok(matches))
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UpstreamHealth {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[utoipa::path(
    get,
    path = "/weather/health",
    responses(
        (status = OK, description = "Upstream weather provider is reachable", body = UpstreamHealth),
        (status = SERVICE_UNAVAILABLE, description = "Upstream weather provider is unreachable")
    ))]
pub async fn weather_health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<UpstreamHealth>>) {
    let healthy = state.provider.check_health().await;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        ApiResponse::ok(UpstreamHealth {
            status: if healthy { "healthy" } else { "unhealthy" },
            timestamp: OffsetDateTime::now_utc(),
        }),
    )
}
