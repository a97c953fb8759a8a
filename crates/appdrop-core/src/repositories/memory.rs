//! In-memory tenant directory, keyed by normalized domain

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use appdrop_shared::utils::normalize_domain;

use crate::domain::Tenant;
use crate::error::DomainError;
use crate::repositories::{TenantDirectory, TenantRepository};

#[derive(Debug, Default)]
pub struct InMemoryTenantRepository {
    tenants: RwLock<HashMap<String, Tenant>>,
}

impl InMemoryTenantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenants(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        let repo = Self::new();
        for tenant in tenants {
            repo.insert(tenant);
        }
        repo
    }

    /// Stores `tenant` under its normalized domain, replacing any previous entry.
    pub fn insert(&self, mut tenant: Tenant) {
        tenant.domain = normalize_domain(&tenant.domain);
        self.tenants.write().insert(tenant.domain.clone(), tenant);
    }

    pub fn len(&self) -> usize {
        self.tenants.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.read().is_empty()
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantRepository {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tenants.read().get(&normalize_domain(domain)).cloned())
    }
}

#[async_trait]
impl TenantRepository for InMemoryTenantRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Tenant>, DomainError> {
        let email = email.trim();
        Ok(self
            .tenants
            .read()
            .values()
            .find(|t| t.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        let mut tenant = tenant.clone();
        tenant.domain = normalize_domain(&tenant.domain);

        let mut tenants = self.tenants.write();
        if tenants.contains_key(&tenant.domain) {
            return Err(DomainError::TenantDomainAlreadyExists(tenant.domain));
        }
        if tenants.values().any(|t| t.email.eq_ignore_ascii_case(&tenant.email)) {
            return Err(DomainError::TenantEmailAlreadyExists(tenant.email));
        }
        tenants.insert(tenant.domain.clone(), tenant.clone());
        Ok(tenant)
    }
}
