// ============================================================================
// APPDROP Infrastructure - PostgreSQL Brand Repository
// File: crates/appdrop-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use appdrop_core::domain::Tenant;
use appdrop_core::error::DomainError;
use appdrop_core::repositories::{TenantDirectory, TenantRepository};

const BRAND_COLUMNS: &str = "id, name, logo, office_address, domain, email, password_hash, created_at, updated_at";

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str, what: &str) -> Result<Option<Tenant>, DomainError> {
        let sql = format!("SELECT {} FROM brands WHERE {} LIMIT 1", BRAND_COLUMNS, filter);
        let row: Option<BrandRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding brand by {}: {}", what, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(Tenant::from))
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct BrandRow {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub office_address: Option<String>,
    pub domain: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BrandRow> for Tenant {
    fn from(row: BrandRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            logo: row.logo.unwrap_or_default(),
            office_address: row.office_address.unwrap_or_default(),
            domain: row.domain,
            email: row.email.unwrap_or_default(),
            credential_hash: row.password_hash.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TenantDirectory for PgTenantRepository {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DomainError> {
        self.find_one("LOWER(domain) = LOWER($1)", domain, "domain").await
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Tenant>, DomainError> {
        self.find_one("LOWER(email) = LOWER($1)", email.trim(), "email").await
    }

    async fn create(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        info!("Creating brand: {}", tenant.domain);

        let sql = format!(
            r#"
            INSERT INTO brands ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            BRAND_COLUMNS, BRAND_COLUMNS
        );
        let row: BrandRow = sqlx::query_as(&sql)
            .bind(tenant.id)
            .bind(&tenant.name)
            .bind(&tenant.logo)
            .bind(&tenant.office_address)
            .bind(&tenant.domain)
            .bind(&tenant.email)
            .bind(&tenant.credential_hash)
            .bind(tenant.created_at)
            .bind(tenant.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    if db.constraint().is_some_and(|c| c.contains("email")) {
                        DomainError::TenantEmailAlreadyExists(tenant.email.clone())
                    } else {
                        DomainError::TenantDomainAlreadyExists(tenant.domain.clone())
                    }
                }
                _ => {
                    error!("Failed to create brand: {}", e);
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        info!(brand_id = %row.id, "Brand created");
        Ok(row.into())
    }
}
