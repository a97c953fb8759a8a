//! Domain services (business logic)

pub mod auth_service;
pub mod session_authenticator;
pub mod tenant_resolver;
pub mod tenant_service;

pub use auth_service::{AuthService, LoginResult};
pub use session_authenticator::SessionAuthenticator;
pub use tenant_resolver::TenantResolver;
pub use tenant_service::TenantService;
