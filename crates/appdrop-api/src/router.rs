use axum::{
    routing::{get, post},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::{auth, brand, health};
use crate::state::AppState;

/// Builds the HTTP surface.
///
/// - public: `/health`, `POST /brands`
/// - brand scoped: `/login`, `/logout`
/// - brand scoped and authenticated: `/brands/me`, `/brands/{id}`
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/brands", post(brand::register));

    let tenant_scoped = state.tenant_scope.guard(
        Router::new()
            .route("/login", post(auth::login))
            .route("/logout", post(auth::logout)),
    );

    let protected = state.protected_scope.guard(
        Router::new()
            .route("/brands/me", get(brand::me))
            .route("/brands/{id}", get(brand::by_id)),
    );

    Router::new()
        .merge(public)
        .merge(tenant_scoped)
        .merge(protected)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
