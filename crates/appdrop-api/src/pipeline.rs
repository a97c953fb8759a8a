//! Request pipeline composer
//!
//! A [`Pipeline`] is an ordered list of [`Stage`]s run before a handler. Each
//! stage either hands an updated [`RequestTenantContext`] to the next one or
//! rejects the request, in which case no later stage and no handler runs.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::{self as axum_middleware, Next},
    response::Response,
    Router,
};
use tracing::{debug, warn};

use crate::context::RequestTenantContext;
use crate::error::ApiError;
use crate::middleware::{RequireSession, ResolveTenant};

#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        parts: &Parts,
        ctx: RequestTenantContext,
    ) -> Result<RequestTenantContext, ApiError>;
}

#[derive(Clone)]
pub struct Pipeline {
    stages: Arc<[Arc<dyn Stage>]>,
}

impl Pipeline {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self { stages: stages.into() }
    }

    /// Brand resolution only: login, logout.
    pub fn tenant_scope(resolve: ResolveTenant) -> Self {
        Self::new(vec![Arc::new(resolve)])
    }

    /// Brand resolution, then the session gate.
    pub fn authenticated(resolve: ResolveTenant, require: RequireSession) -> Self {
        Self::new(vec![Arc::new(resolve), Arc::new(require)])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs every stage in order, stopping at the first rejection.
    pub async fn execute(&self, parts: &Parts) -> Result<RequestTenantContext, ApiError> {
        let mut ctx = RequestTenantContext::new();

        for stage in self.stages.iter() {
            ctx = match stage.run(parts, ctx).await {
                Ok(next) => next,
                Err(err) => {
                    warn!(
                        stage = stage.name(),
                        code = err.code(),
                        path = %parts.uri.path(),
                        "REJECTED"
                    );
                    return Err(err);
                }
            };
            debug!(stage = stage.name(), "stage passed");
        }

        match (ctx.tenant(), ctx.subject_id()) {
            (Some(tenant), Some(_)) => debug!(brand_id = %tenant.id, path = %parts.uri.path(), "AUTHENTICATED"),
            (Some(tenant), None) => debug!(brand_id = %tenant.id, path = %parts.uri.path(), "TENANT_RESOLVED"),
            _ => {}
        }

        Ok(ctx)
    }

    /// Puts this pipeline in front of every route in `routes`.
    pub fn guard<S>(&self, routes: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        routes.route_layer(axum_middleware::from_fn_with_state(self.clone(), enforce))
    }
}

/// Middleware entry point; use through [`Pipeline::guard`] or `from_fn_with_state`.
pub async fn enforce(
    State(pipeline): State<Pipeline>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let ctx = pipeline.execute(&parts).await?;
    parts.extensions.insert(ctx);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use appdrop_core::{NewTenant, Tenant};
    use axum::http::Request as HttpRequest;

    struct Counting {
        name: &'static str,
        calls: Arc<AtomicUsize>,
        reject: bool,
    }

    #[async_trait]
    impl Stage for Counting {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn run(
            &self,
            _parts: &Parts,
            ctx: RequestTenantContext,
        ) -> Result<RequestTenantContext, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                return Err(ApiError::Unauthorized("stop".into()));
            }
            if ctx.tenant().is_none() {
                return ctx.bind_tenant(tenant());
            }
            Ok(ctx)
        }
    }

    fn tenant() -> Tenant {
        Tenant::from_registration(
            NewTenant {
                name: "Acme".into(),
                domain: "acmeco".into(),
                email: "owner@acme.test".into(),
                password: "x".into(),
                ..Default::default()
            },
            String::new(),
        )
    }

    fn stage(name: &'static str, reject: bool) -> (Arc<dyn Stage>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = Counting { name, calls: calls.clone(), reject };
        (Arc::new(stage), calls)
    }

    fn parts() -> Parts {
        HttpRequest::builder().uri("/").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let (first, first_calls) = stage("first", false);
        let (second, second_calls) = stage("second", false);
        let pipeline = Pipeline::new(vec![first, second]);

        assert_eq!(pipeline.stage_names(), vec!["first", "second"]);
        let ctx = pipeline.execute(&parts()).await.unwrap();
        assert_eq!(ctx.tenant().map(|t| t.domain.as_str()), Some("acmeco"));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejection_short_circuits() {
        let (first, first_calls) = stage("first", true);
        let (second, second_calls) = stage("second", false);
        let pipeline = Pipeline::new(vec![first, second]);

        let err = pipeline.execute(&parts()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_pipeline_passes_empty_context() {
        let ctx = Pipeline::new(Vec::new()).execute(&parts()).await.unwrap();
        assert!(ctx.tenant().is_none());
        assert!(!ctx.is_authenticated());
    }
}
