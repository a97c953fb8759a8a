//! Binds a request to exactly one brand.
//!
//! The domain key comes from the `X-Brand-Domain` header when present,
//! otherwise from the first label of the request host.

use std::sync::Arc;

use tracing::debug;

use appdrop_shared::constants::RESERVED_SUBDOMAIN;
use appdrop_shared::utils::{normalize_domain, strip_port};

use crate::domain::Tenant;
use crate::error::DomainError;
use crate::repositories::TenantDirectory;

#[derive(Clone)]
pub struct TenantResolver {
    directory: Arc<dyn TenantDirectory>,
}

impl TenantResolver {
    pub fn new(directory: Arc<dyn TenantDirectory>) -> Self {
        Self { directory }
    }

    /// Derives the normalized domain key without touching the directory.
    pub fn domain_key(
        override_header: Option<&str>,
        host: Option<&str>,
    ) -> Result<String, DomainError> {
        if let Some(header) = override_header.filter(|h| !h.is_empty()) {
            let key = normalize_domain(header);
            if key.is_empty() {
                return Err(DomainError::MissingTenantKey);
            }
            return Ok(key);
        }

        let host = strip_port(host.unwrap_or_default());
        let (subdomain, _) = host.split_once('.').ok_or(DomainError::MissingTenantKey)?;
        let key = normalize_domain(subdomain);
        if key.is_empty() || key == RESERVED_SUBDOMAIN {
            return Err(DomainError::MissingTenantKey);
        }
        Ok(key)
    }

    pub async fn resolve(
        &self,
        override_header: Option<&str>,
        host: Option<&str>,
    ) -> Result<Tenant, DomainError> {
        let key = Self::domain_key(override_header, host)?;
        match self.directory.find_by_domain(&key).await? {
            Some(tenant) => {
                debug!(brand_id = %tenant.id, domain = %key, "brand resolved");
                Ok(tenant)
            }
            None => Err(DomainError::TenantNotFound(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTenant;
    use crate::repositories::MockTenantDirectory;

    fn acme() -> Tenant {
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

    #[test]
    fn test_header_takes_precedence() {
        let key = TenantResolver::domain_key(Some("  AcmeCo "), Some("globex.example.com"));
        assert_eq!(key.unwrap(), "acmeco");
    }

    #[test]
    fn test_subdomain_from_host() {
        assert_eq!(TenantResolver::domain_key(None, Some("Acme.example.com:8082")).unwrap(), "acme");
        assert_eq!(TenantResolver::domain_key(Some(""), Some("acme.example.com")).unwrap(), "acme");
    }

    #[test]
    fn test_missing_key_cases() {
        let cases = [
            (None, None),
            (None, Some("")),
            (None, Some("localhost")),
            (None, Some("localhost:8082")),
            (None, Some("www.example.com")),
            (None, Some("WWW.example.com")),
            (None, Some(".example.com")),
            (Some("   "), Some("acme.example.com")),
        ];
        for (header, host) in cases {
            assert_eq!(
                TenantResolver::domain_key(header, host),
                Err(DomainError::MissingTenantKey),
                "header={header:?} host={host:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_looks_up_normalized_key() {
        let tenant = acme();
        let expected = tenant.clone();
        let mut directory = MockTenantDirectory::new();
        directory
            .expect_find_by_domain()
            .withf(|domain| domain == "acmeco")
            .times(1)
            .returning(move |_| Ok(Some(tenant.clone())));

        let resolver = TenantResolver::new(Arc::new(directory));
        let resolved = resolver.resolve(Some("AcmeCo"), None).await.unwrap();
        assert_eq!(resolved, expected);
    }

    #[tokio::test]
    async fn test_resolve_not_found_names_only_the_key() {
        let mut directory = MockTenantDirectory::new();
        directory.expect_find_by_domain().times(1).returning(|_| Ok(None));

        let resolver = TenantResolver::new(Arc::new(directory));
        let err = resolver.resolve(None, Some("globex.example.com")).await.unwrap_err();
        assert_eq!(err, DomainError::TenantNotFound("globex".into()));
    }

    #[tokio::test]
    async fn test_missing_key_never_queries_directory() {
        let mut directory = MockTenantDirectory::new();
        directory.expect_find_by_domain().never();

        let resolver = TenantResolver::new(Arc::new(directory));
        let err = resolver.resolve(None, Some("www.example.com")).await.unwrap_err();
        assert_eq!(err, DomainError::MissingTenantKey);
    }

    #[tokio::test]
    async fn test_directory_failure_propagates() {
        let mut directory = MockTenantDirectory::new();
        directory
            .expect_find_by_domain()
            .returning(|_| Err(DomainError::DatabaseError("connection reset".into())));

        let resolver = TenantResolver::new(Arc::new(directory));
        let err = resolver.resolve(Some("acmeco"), None).await.unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
