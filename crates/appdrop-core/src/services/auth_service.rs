// ============================================================================
// APPDROP Core - Authentication Service
// File: crates/appdrop-core/src/services/auth_service.rs
// ============================================================================
//! Brand login: credential check and session token issuing

use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

use appdrop_security::jwt::SessionTokenCodec;
use appdrop_security::password::PasswordService;

use crate::domain::Tenant;
use crate::error::DomainError;

/// Authentication service for brand-scoped logins
#[derive(Clone)]
pub struct AuthService {
    codec: Arc<SessionTokenCodec>,
    fallback_password: Option<String>,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(codec: Arc<SessionTokenCodec>, fallback_password: Option<String>, token_ttl: Duration) -> Self {
        Self {
            codec,
            fallback_password: fallback_password.filter(|p| !p.is_empty()),
            token_ttl,
        }
    }

    /// Login to `tenant` with email and password
    pub fn login(
        &self,
        tenant: &Tenant,
        email: &str,
        password: &str,
    ) -> Result<LoginResult, DomainError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError(
                "Email and password are required".to_string(),
            ));
        }

        info!(brand_id = %tenant.id, "Login attempt for email: {}", email);

        // 1. Verify password
        if !self.password_matches(tenant, password) {
            warn!(brand_id = %tenant.id, "Login failed: invalid password for: {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        // 2. Issue session token bound to this brand
        let token = self
            .codec
            .issue(tenant.id, email, Some(self.token_ttl))
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!(brand_id = %tenant.id, "Login successful for: {}", email);

        Ok(LoginResult {
            brand_id: tenant.id,
            subject_id: email.to_string(),
            token,
        })
    }

    fn password_matches(&self, tenant: &Tenant, password: &str) -> bool {
        if !tenant.credential_hash.is_empty() {
            match PasswordService::verify(password, &tenant.credential_hash) {
                Ok(true) => return true,
                Ok(false) => {}
                Err(e) => error!(brand_id = %tenant.id, "Stored credential unreadable: {}", e),
            }
        }
        self.fallback_password.as_deref() == Some(password)
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub brand_id: Uuid,
    pub subject_id: String,
    pub token: String,
}
