//! Tenant repository traits (ports)

use async_trait::async_trait;
use crate::domain::Tenant;
use crate::error::DomainError;

/// Lookup capability the tenant resolver depends on.
///
/// Each call is an independent read; implementations must not cache across requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// `domain` is expected in normalized (trimmed, lowercase) form.
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DomainError>;
}

#[async_trait]
pub trait TenantRepository: TenantDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Tenant>, DomainError>;
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, DomainError>;
}
