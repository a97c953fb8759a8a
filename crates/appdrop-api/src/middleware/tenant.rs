use async_trait::async_trait;
use axum::http::request::Parts;

use appdrop_core::services::TenantResolver;
use appdrop_shared::constants::BRAND_DOMAIN_HEADER;

use crate::context::{RequestHost, RequestTenantContext};
use crate::error::ApiError;
use crate::pipeline::Stage;

/// Binds the request to the brand named by `X-Brand-Domain` or the host subdomain.
#[derive(Clone)]
pub struct ResolveTenant {
    resolver: TenantResolver,
}

impl ResolveTenant {
    pub fn new(resolver: TenantResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Stage for ResolveTenant {
    fn name(&self) -> &'static str {
        "resolve_tenant"
    }

    async fn run(
        &self,
        parts: &Parts,
        ctx: RequestTenantContext,
    ) -> Result<RequestTenantContext, ApiError> {
        let header = parts
            .headers
            .get(BRAND_DOMAIN_HEADER)
            .and_then(|value| value.to_str().ok());
        let host = RequestHost::from_parts(parts);

        let tenant = self.resolver.resolve(header, host).await?;
        ctx.bind_tenant(tenant)
    }
}
