use axum::{
    response::{IntoResponse, Response},
    Json,
};
use hyper::StatusCode;
use log::error;
use serde_json::json;

use crate::{location, provider, weather};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Location(#[from] location::Error),
    #[error(transparent)]
    Provider(#[from] provider::Error),
    #[error(transparent)]
    Weather(#[from] weather::Error),
    #[error("Unexpected error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("error handling request: {}", self);

        let (status, code, detail) = match &self {
            AppError::Validation(detail) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", detail.clone())
            }
            AppError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            AppError::Location(e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Provider(e) => match e {
                provider::Error::Unauthorized => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", e.to_string())
                }
                provider::Error::Forbidden => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", e.to_string())
                }
                provider::Error::LocationNotFound => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", e.to_string())
                }
                provider::Error::RateLimited => (
                    StatusCode::TOO_MANY_REQUESTS,
                    "TOO_MANY_REQUESTS",
                    e.to_string(),
                ),
                provider::Error::UpstreamServer(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    String::from("Weather provider server error"),
                ),
                // Transport failures and unexpected statuses get a
                // production-safe detail.
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    String::from("Failed to fetch weather data"),
                ),
            },
            AppError::Weather(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                String::from("Failed to process weather data"),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                String::from("Internal server error"),
            ),
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "title": status.canonical_reason().unwrap_or("Error"),
                "detail": detail,
                "code": code,
            },
        }));
        (status, body).into_response()
    }
}
