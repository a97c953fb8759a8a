//! Brand registration and profile handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use appdrop_core::{NewTenant, Tenant};

use crate::context::CurrentSession;
use crate::error::ApiError;
use crate::state::AppState;

/// Register handler - POST /brands
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewTenant>, JsonRejection>,
) -> Result<(StatusCode, Json<Tenant>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Validation("Invalid request body".to_string()))?;

    let tenant = state.tenants.register(payload).await?;
    Ok((StatusCode::CREATED, Json(tenant)))
}

/// Current brand - GET /brands/me
pub async fn me(session: CurrentSession) -> Json<Tenant> {
    Json(Tenant::clone(&session.tenant))
}

/// Brand by id - GET /brands/{id}
///
/// A session may only read its own brand.
pub async fn by_id(
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<Tenant>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::Validation("Invalid brand ID".to_string()))?;
    if id != session.tenant.id {
        tracing::warn!(brand_id = %session.tenant.id, requested = %id, "Cross-brand read rejected");
        return Err(ApiError::Forbidden("Cannot access another brand".to_string()));
    }

    Ok(Json(Tenant::clone(&session.tenant)))
}
