//! # APPDROP Infrastructure
//! 
//! PostgreSQL tenant directory (adapter).

pub mod database;

pub use database::{create_pool, ensure_schema, PgTenantRepository};
