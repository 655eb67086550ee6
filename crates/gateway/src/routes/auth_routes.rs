use axum::Json;

use crate::{AccessToken, ApiResponse, DecodedToken};

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = OK, description = "Decoded claims of the presented access token"),
        (status = UNAUTHORIZED, description = "Token missing, invalid, expired, or of the wrong type")
    ))]
pub async fn me(AccessToken(auth): AccessToken) -> Json<ApiResponse<DecodedToken>> {
    ApiResponse::ok(auth.claims)
}
