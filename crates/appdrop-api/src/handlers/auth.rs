// ============================================================================
// APPDROP API - Auth Handlers
// File: crates/appdrop-api/src/handlers/auth.rs
// ============================================================================
//! Brand login and logout. Both run behind the tenant stage only.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::context::{CurrentTenant, RequestHost};
use crate::error::ApiError;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub brand_id: String,
}

/// Login handler - POST /login
pub async fn login(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    RequestHost(host): RequestHost,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Validation("Invalid request body".to_string()))?;

    let result = state.auth.login(&tenant, &payload.email, &payload.password)?;

    let mut headers = HeaderMap::new();
    state
        .carrier
        .attach(&mut headers, &result.token, &host, state.secure_cookies)
        .map_err(|e| ApiError::Internal(format!("session cookie: {}", e)))?;

    Ok((
        headers,
        Json(LoginResponse {
            message: "ok".to_string(),
            brand_id: result.brand_id.to_string(),
        }),
    ))
}

/// Logout handler - POST /logout
///
/// Only instructs the client to drop its cookie; the token itself stays
/// valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    CurrentTenant(tenant): CurrentTenant,
    RequestHost(host): RequestHost,
) -> Result<impl IntoResponse, ApiError> {
    let mut headers = HeaderMap::new();
    state
        .carrier
        .clear(&mut headers, &host, state.secure_cookies)
        .map_err(|e| ApiError::Internal(format!("session cookie: {}", e)))?;

    tracing::info!(brand_id = %tenant.id, "Logout");
    Ok((headers, Json(MessageResponse::new("logged out"))))
}
