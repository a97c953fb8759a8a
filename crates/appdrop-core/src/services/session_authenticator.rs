//! Gates protected operations on a valid session for the resolved brand.
//!
//! A session token never authorizes access under any brand other than the
//! one it was issued for.

use std::sync::Arc;

use tracing::warn;

use appdrop_security::jwt::{SessionClaims, SessionTokenCodec};

use crate::domain::Tenant;
use crate::error::DomainError;

#[derive(Clone)]
pub struct SessionAuthenticator {
    codec: Arc<SessionTokenCodec>,
}

impl SessionAuthenticator {
    pub fn new(codec: Arc<SessionTokenCodec>) -> Self {
        Self { codec }
    }

    /// Checks `token` against the brand already bound to the request.
    ///
    /// Every verification failure collapses into `Unauthorized` so callers
    /// cannot tell an expired token from a forged one.
    pub fn authenticate(
        &self,
        tenant: Option<&Tenant>,
        token: Option<&str>,
    ) -> Result<SessionClaims, DomainError> {
        let tenant = tenant.ok_or(DomainError::TenantContextMissing)?;

        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::Unauthorized)?;

        let claims = self.codec.verify(token).map_err(|e| {
            warn!(brand_id = %tenant.id, reason = %e, "session rejected");
            DomainError::Unauthorized
        })?;

        if claims.tenant_id != tenant.id {
            warn!(
                brand_id = %tenant.id,
                session_brand_id = %claims.tenant_id,
                "cross-brand session rejected"
            );
            return Err(DomainError::Forbidden);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTenant;
    use appdrop_security::clock::FixedClock;
    use chrono::{Duration, Utc};

    const SECRET: &str = "authenticator-secret";

    fn tenant(domain: &str) -> Tenant {
        Tenant::from_registration(
            NewTenant {
                name: domain.into(),
                domain: domain.into(),
                email: format!("owner@{domain}.test"),
                password: "x".into(),
                ..Default::default()
            },
            String::new(),
        )
    }

    fn codec() -> Arc<SessionTokenCodec> {
        Arc::new(SessionTokenCodec::new(SECRET).unwrap())
    }

    #[test]
    fn test_valid_session_yields_claims() {
        let acme = tenant("acmeco");
        let codec = codec();
        let token = codec.issue(acme.id, "owner@acmeco.test", None).unwrap();

        let claims = SessionAuthenticator::new(codec)
            .authenticate(Some(&acme), Some(&token))
            .unwrap();
        assert_eq!(claims.subject_id, "owner@acmeco.test");
        assert_eq!(claims.tenant_id, acme.id);
    }

    #[test]
    fn test_missing_tenant_is_context_error() {
        let auth = SessionAuthenticator::new(codec());
        assert_eq!(auth.authenticate(None, Some("x")), Err(DomainError::TenantContextMissing));
    }

    #[test]
    fn test_absent_or_blank_token_is_unauthorized() {
        let acme = tenant("acmeco");
        let auth = SessionAuthenticator::new(codec());
        for token in [None, Some(""), Some("   ")] {
            assert_eq!(auth.authenticate(Some(&acme), token), Err(DomainError::Unauthorized));
        }
    }

    #[test]
    fn test_invalid_and_expired_are_indistinguishable() {
        let acme = tenant("acmeco");
        let past = Utc::now() - Duration::days(2);
        let stale = SessionTokenCodec::with_clock(SECRET, Arc::new(FixedClock(past)))
            .unwrap()
            .issue(acme.id, "u", None)
            .unwrap();

        let auth = SessionAuthenticator::new(codec());
        let expired = auth.authenticate(Some(&acme), Some(&stale));
        let forged = auth.authenticate(Some(&acme), Some("not.a.token"));
        assert_eq!(expired, Err(DomainError::Unauthorized));
        assert_eq!(expired, forged);
    }

    #[test]
    fn test_token_for_other_brand_is_forbidden() {
        let acme = tenant("acmeco");
        let globex = tenant("globex");
        let codec = codec();
        let token = codec.issue(acme.id, "owner@acmeco.test", None).unwrap();

        let result = SessionAuthenticator::new(codec).authenticate(Some(&globex), Some(&token));
        assert_eq!(result, Err(DomainError::Forbidden));
    }
}
