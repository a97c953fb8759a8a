//! # APPDROP Core - Domain Module

pub mod tenant;

pub use tenant::{NewTenant, Tenant};
