//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Brand domain required (subdomain or X-Brand-Domain header)")]
    MissingTenantKey,

    #[error("Brand not found for domain: {0}")]
    TenantNotFound(String),

    /// No brand was bound before a stage that needs one.
    #[error("Brand not found for this domain")]
    TenantContextMissing,

    #[error("Missing or invalid session")]
    Unauthorized,

    #[error("Brand in session does not match this domain")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Brand domain already exists: {0}")]
    TenantDomainAlreadyExists(String),

    #[error("Brand email already exists: {0}")]
    TenantEmailAlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
