//! Brand self-registration and lookup

use std::sync::Arc;

use tracing::{info, warn};

use appdrop_security::password::PasswordService;

use crate::domain::{NewTenant, Tenant};
use crate::error::DomainError;
use crate::repositories::TenantRepository;

#[derive(Clone)]
pub struct TenantService {
    repo: Arc<dyn TenantRepository>,
}

impl TenantService {
    pub fn new(repo: Arc<dyn TenantRepository>) -> Self {
        Self { repo }
    }

    /// Register a new brand
    pub async fn register(&self, input: NewTenant) -> Result<Tenant, DomainError> {
        let input = input.normalized();

        // 1. Validate input
        input.check().map_err(DomainError::ValidationError)?;

        info!("Brand registration attempt for domain: {}", input.domain);

        // 2. Check domain and email uniqueness
        if self.repo.find_by_domain(&input.domain).await?.is_some() {
            warn!("Registration failed: domain already exists: {}", input.domain);
            return Err(DomainError::TenantDomainAlreadyExists(input.domain));
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", input.email);
            return Err(DomainError::TenantEmailAlreadyExists(input.email));
        }

        // 3. Hash password
        let credential_hash = PasswordService::hash(&input.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 4. Save
        let tenant = Tenant::from_registration(input, credential_hash);
        let created = self.repo.create(&tenant).await?;

        info!(brand_id = %created.id, "Brand registered for domain: {}", created.domain);
        Ok(created)
    }
}
