use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::IntoResponse,
    Json,
};
use hyper::{
    header::{AUTHORIZATION, COOKIE},
    StatusCode,
};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{convert::Infallible, sync::Arc};
use time::OffsetDateTime;

use crate::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
const TOKEN_QUERY_PARAM: &str = "token";

/// JWT verification/signing settings, loaded once at startup.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub default_expiry_secs: i64,
}

impl JwtConfig {
    /// Signs a token carrying the standard claims and the configured default
    /// expiry.
    pub fn issue(&self, sub: &str, token_type: &str) -> Result<String, AuthError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = DecodedToken {
            exp: now + self.default_expiry_secs,
            iat: Some(now),
            sub: Some(sub.to_owned()),
            token_type: Some(token_type.to_owned()),
            ..Default::default()
        };
        sign_token(&claims, &self.secret)
    }
}

/// Decoded JWT payload: a typed view of the standard claims plus whatever
/// else the caller put in the token, untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DecodedToken {
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(rename = "tokenType", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication token required")]
    MissingToken,
    #[error("Authentication token expired")]
    Expired,
    #[error("Malformed authentication token")]
    Malformed,
    #[error("Authentication token not yet active")]
    NotYetActive,
    #[error("Invalid authentication token")]
    Invalid,
    #[error("Invalid token type")]
    WrongTokenType,
    #[error("Failed to sign authentication token: {0}")]
    Signing(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        log::warn!("{}", self);
        let status = match self {
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        let body = Json(json!({
            "success": false,
            "error": {
                "title": status.canonical_reason().unwrap_or("Error"),
                "detail": self.to_string(),
                "code": if status == StatusCode::UNAUTHORIZED { "UNAUTHORIZED" } else { "INTERNAL_ERROR" },
            },
        }));
        (status, body).into_response()
    }
}

pub fn sign_token(claims: &DecodedToken, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Verifies signature and expiry against the shared secret. The payload is
/// otherwise opaque; `nbf` is honored when present.
pub fn verify_token(token: &str, secret: &str) -> Result<DecodedToken, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_aud = false;

    let decoded = decode::<DecodedToken>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::ImmatureSignature => AuthError::NotYetActive,
        ErrorKind::InvalidSignature => AuthError::Invalid,
        _ => AuthError::Malformed,
    })?;

    let claims = decoded.claims;
    if let Some(nbf) = claims.nbf {
        if nbf > OffsetDateTime::now_utc().unix_timestamp() {
            return Err(AuthError::NotYetActive);
        }
    }
    Ok(claims)
}

/// Pulls the bearer token out of the request: Authorization header first,
/// then the `token` query parameter, then the `access_token` cookie.
fn bearer_token(parts: &Parts) -> Option<String> {
    if let Some(header) = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = header.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_owned());
            }
        }
    }

    if let Some(query) = parts.uri.query() {
        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix(TOKEN_QUERY_PARAM) {
                if let Some(value) = value.strip_prefix('=') {
                    if !value.is_empty() {
                        return Some(value.to_owned());
                    }
                }
            }
        }
    }

    if let Some(cookies) = parts.headers.get(COOKIE).and_then(|h| h.to_str().ok()) {
        for cookie in cookies.split(';') {
            if let Some(value) = cookie.trim().strip_prefix(ACCESS_TOKEN_COOKIE) {
                if let Some(value) = value.strip_prefix('=') {
                    if !value.is_empty() {
                        return Some(value.to_owned());
                    }
                }
            }
        }
    }

    None
}

/// Mandatory auth gate: rejects the request unless a verifiable token is
/// present, and hands the decoded claims to the handler.
#[derive(Clone, Debug)]
pub struct JwtAuth {
    pub claims: DecodedToken,
    pub token: String,
}

impl<S> FromRequestParts<S> for JwtAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);
        let token = bearer_token(parts).ok_or(AuthError::MissingToken)?;
        let claims = verify_token(&token, &state.jwt.secret)?;
        Ok(Self { claims, token })
    }
}

/// Advisory auth gate: runs the same checks but never rejects; on any
/// failure the request simply proceeds without claims.
#[derive(Clone, Debug)]
pub struct OptionalJwtAuth(pub Option<JwtAuth>);

impl<S> FromRequestParts<S> for OptionalJwtAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(JwtAuth::from_request_parts(parts, state).await.ok()))
    }
}

/// Stricter gate requiring `tokenType == "access"`.
#[derive(Clone, Debug)]
pub struct AccessToken(pub JwtAuth);

impl<S> FromRequestParts<S> for AccessToken
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = JwtAuth::from_request_parts(parts, state).await?;
        match auth.claims.token_type.as_deref() {
            Some("access") => Ok(Self(auth)),
            _ => Err(AuthError::WrongTokenType),
        }
    }
}

/// Stricter gate requiring `tokenType == "refresh"`.
#[derive(Clone, Debug)]
pub struct RefreshToken(pub JwtAuth);

impl<S> FromRequestParts<S> for RefreshToken
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = JwtAuth::from_request_parts(parts, state).await?;
        match auth.claims.token_type.as_deref() {
            Some("refresh") => Ok(Self(auth)),
            _ => Err(AuthError::WrongTokenType),
        }
    }
}
