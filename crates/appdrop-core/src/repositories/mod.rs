//! Tenant directory ports and the in-memory adapter

pub mod tenant_repository;
pub mod memory;

pub use tenant_repository::{TenantDirectory, TenantRepository};
pub use memory::InMemoryTenantRepository;

#[cfg(test)]
pub use tenant_repository::MockTenantDirectory;
