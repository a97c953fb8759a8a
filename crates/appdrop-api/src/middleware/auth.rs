use async_trait::async_trait;
use axum::http::request::Parts;

use appdrop_core::services::SessionAuthenticator;
use appdrop_security::SessionCarrier;

use crate::context::RequestTenantContext;
use crate::error::ApiError;
use crate::pipeline::Stage;

/// Requires a session cookie whose token belongs to the already-bound brand.
#[derive(Clone)]
pub struct RequireSession {
    authenticator: SessionAuthenticator,
    carrier: SessionCarrier,
}

impl RequireSession {
    pub fn new(authenticator: SessionAuthenticator, carrier: SessionCarrier) -> Self {
        Self { authenticator, carrier }
    }
}

#[async_trait]
impl Stage for RequireSession {
    fn name(&self) -> &'static str {
        "require_session"
    }

    async fn run(
        &self,
        parts: &Parts,
        ctx: RequestTenantContext,
    ) -> Result<RequestTenantContext, ApiError> {
        let token = self.carrier.read(&parts.headers);
        let claims = self.authenticator.authenticate(ctx.tenant(), token.as_deref())?;
        ctx.bind_subject(claims.subject_id)
    }
}
