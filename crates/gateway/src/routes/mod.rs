pub mod auth_routes;
pub mod health_routes;
pub mod weather_routes;

pub use auth_routes::*;
pub use health_routes::*;
pub use weather_routes::*;

use axum::Json;
use serde::Serialize;

/// Standard response envelope shared by every endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: None,
            message: Some(message.into()),
        })
    }
}
