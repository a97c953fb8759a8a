use std::sync::Arc;

use chrono::Duration;

use appdrop_core::repositories::TenantRepository;
use appdrop_core::services::{AuthService, SessionAuthenticator, TenantResolver, TenantService};
use appdrop_security::jwt::default_token_duration;
use appdrop_security::{SessionCarrier, SessionTokenCodec, TokenError};
use appdrop_shared::config::AppConfig;
use appdrop_shared::constants::DEFAULT_COOKIE_NAME;

use crate::middleware::{RequireSession, ResolveTenant};
use crate::pipeline::Pipeline;

/// Session cookie and login settings.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub cookie_name: String,
    pub secure_cookies: bool,
    pub fallback_password: Option<String>,
    pub token_ttl: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secure_cookies: false,
            fallback_password: None,
            token_ttl: default_token_duration(),
        }
    }
}

impl From<&AppConfig> for SessionOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            cookie_name: config.session.cookie_name.clone(),
            secure_cookies: config.session.secure,
            fallback_password: config.auth.login_password.clone(),
            token_ttl: Duration::try_seconds(config.jwt.token_ttl_secs)
                .unwrap_or_else(default_token_duration),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tenants: TenantService,
    pub carrier: SessionCarrier,
    pub secure_cookies: bool,
    pub tenant_scope: Pipeline,
    pub protected_scope: Pipeline,
}

impl AppState {
    pub fn new<R>(repo: Arc<R>, codec: Arc<SessionTokenCodec>, options: SessionOptions) -> Self
    where
        R: TenantRepository + 'static,
    {
        let carrier = SessionCarrier::new(options.cookie_name);
        let resolve = ResolveTenant::new(TenantResolver::new(repo.clone()));
        let require = RequireSession::new(SessionAuthenticator::new(codec.clone()), carrier.clone());

        Self {
            auth: AuthService::new(codec, options.fallback_password, options.token_ttl),
            tenants: TenantService::new(repo),
            carrier,
            secure_cookies: options.secure_cookies,
            tenant_scope: Pipeline::tenant_scope(resolve.clone()),
            protected_scope: Pipeline::authenticated(resolve, require),
        }
    }

    pub fn from_config<R>(config: &AppConfig, repo: Arc<R>) -> Result<Self, TokenError>
    where
        R: TenantRepository + 'static,
    {
        let codec = Arc::new(SessionTokenCodec::new(&config.jwt.secret)?);
        Ok(Self::new(repo, codec, SessionOptions::from(config)))
    }
}
