//! # APPDROP Core
//! 
//! Brand entity, tenant directory ports, and the services that bind a request
//! to exactly one brand and a matching session.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
