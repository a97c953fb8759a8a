//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Configuration error: JWT_SECRET is not set")]
    MissingSigningSecret,

    #[error("Configuration error: {0}")]
    InvalidSetting(String),
}
