//! # APPDROP API
//! 
//! Request pipeline (brand resolution, session gate), HTTP handlers, and router.

pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod response;
pub mod router;
pub mod state;

pub use context::{CurrentSession, CurrentTenant, RequestHost, RequestTenantContext};
pub use error::ApiError;
pub use pipeline::{Pipeline, Stage};
pub use router::build_router;
pub use state::{AppState, SessionOptions};
