//! Per-request brand and session context
//!
//! The pipeline builds a [`RequestTenantContext`] stage by stage and stores it
//! in the request extensions; handlers read it back through the extractors
//! below.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::HOST, request::Parts},
};

use appdrop_core::{DomainError, Tenant};

use crate::error::ApiError;

/// Brand and subject bound to one request.
///
/// The brand is set at most once. A subject only exists alongside a brand.
#[derive(Debug, Clone, Default)]
pub struct RequestTenantContext {
    tenant: Option<Arc<Tenant>>,
    subject_id: Option<String>,
}

impl RequestTenantContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_deref()
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tenant.is_some() && self.subject_id.is_some()
    }

    pub fn bind_tenant(mut self, tenant: Tenant) -> Result<Self, ApiError> {
        if let Some(bound) = &self.tenant {
            return Err(ApiError::Internal(format!(
                "brand {} already bound to this request",
                bound.id
            )));
        }
        self.tenant = Some(Arc::new(tenant));
        Ok(self)
    }

    pub fn bind_subject(mut self, subject_id: String) -> Result<Self, ApiError> {
        if self.tenant.is_none() {
            return Err(DomainError::TenantContextMissing.into());
        }
        self.subject_id = Some(subject_id);
        Ok(self)
    }
}

/// Brand bound by the tenant stage. Rejects with 404 when no brand is bound.
#[derive(Debug, Clone)]
pub struct CurrentTenant(pub Arc<Tenant>);

impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestTenantContext>()
            .and_then(|ctx| ctx.tenant.clone())
            .map(CurrentTenant)
            .ok_or_else(|| DomainError::TenantContextMissing.into())
    }
}

/// Authenticated subject and its brand.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub tenant: Arc<Tenant>,
    pub subject_id: String,
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<RequestTenantContext>()
            .ok_or(DomainError::TenantContextMissing)?;
        let tenant = ctx.tenant.clone().ok_or(DomainError::TenantContextMissing)?;
        let subject_id = ctx.subject_id.clone().ok_or(DomainError::Unauthorized)?;

        Ok(CurrentSession { tenant, subject_id })
    }
}

/// Host the client addressed, from the `Host` header or the absolute URI.
#[derive(Debug, Clone, Default)]
pub struct RequestHost(pub String);

impl RequestHost {
    pub fn from_parts(parts: &Parts) -> Option<&str> {
        parts
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| parts.uri.authority().map(|authority| authority.as_str()))
    }
}

impl<S> FromRequestParts<S> for RequestHost
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestHost(
            Self::from_parts(parts).unwrap_or_default().to_string(),
        ))
    }
}
