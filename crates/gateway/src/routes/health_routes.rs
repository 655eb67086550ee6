use std::sync::Arc;

use axum::{extract::State, Json};
use hyper::StatusCode;
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{ApiResponse, AppState};

fn health_word(healthy: bool) -> &'static str {
    if healthy {
        "healthy"
    } else {
        "unhealthy"
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub upstream: &'static str,
    pub database: &'static str,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct HealthReport {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub checks: HealthChecks,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Process, upstream, and database are all healthy", body = HealthReport),
        (status = SERVICE_UNAVAILABLE, description = "One or more dependencies are unhealthy", body = HealthReport)
    ))]
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthReport>>) {
    let upstream = state.provider.check_health().await;
    let database = state.mongo.ping().await.is_ok();
    let healthy = upstream && database;

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        ApiResponse::ok(HealthReport {
            status: health_word(healthy),
            timestamp: OffsetDateTime::now_utc(),
            checks: HealthChecks {
                upstream: health_word(upstream),
                database: health_word(database),
            },
        }),
    )
}

#[utoipa::path(
    get,
    path = "/ping",
    responses((status = OK, description = "Process is up")))]
pub async fn ping() -> Json<ApiResponse<()>> {
    ApiResponse::message("pong")
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = OK, description = "Service name and version", body = ServiceInfo)))]
pub async fn index() -> Json<ApiResponse<ServiceInfo>> {
    ApiResponse::ok(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
