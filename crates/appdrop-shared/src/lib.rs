//! # APPDROP Shared
//! 
//! Configuration, constants, telemetry, and shared types for the brand-scoped backend.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
