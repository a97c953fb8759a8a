//! Configuration management

use chrono::{Duration, Utc};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_COOKIE_NAME, DEFAULT_PORT, DEFAULT_TOKEN_TTL_SECS};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub token_ttl_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    /// Marks the session cookie `Secure`; enable behind TLS.
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthSettings {
    /// Shared fallback password accepted for any brand login.
    #[serde(default)]
    pub login_password: Option<String>,
}

impl AppConfig {
    /// Loads defaults, `config/*` files and the environment, then validates.
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", i64::from(DEFAULT_PORT))?
            .set_default("app.name", "appdrop-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("jwt.secret", "")?
            .set_default("jwt.token_ttl_secs", DEFAULT_TOKEN_TTL_SECS)?
            .set_default("session.cookie_name", DEFAULT_COOKIE_NAME)?
            .set_default("session.secure", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            // Flat variable names used by existing deployments
            .set_override_option("jwt.secret", non_empty_var("JWT_SECRET"))?
            .set_override_option("session.cookie_name", non_empty_var("JWT_COOKIE_NAME"))?
            .set_override_option("session.secure", non_empty_var("COOKIE_SECURE"))?
            .set_override_option("auth.login_password", non_empty_var("LOGIN_PASSWORD"))?
            .set_override_option("database.url", non_empty_var("DATABASE_URL"))?
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the server cannot safely serve traffic with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(AppError::MissingSigningSecret);
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::InvalidSetting("session cookie name must not be empty".into()));
        }
        let ttl_in_range = Duration::try_seconds(self.jwt.token_ttl_secs)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .is_some();
        if !ttl_in_range {
            return Err(AppError::InvalidSetting(format!(
                "jwt.token_ttl_secs out of range: {}",
                self.jwt.token_ttl_secs
            )));
        }
        tracing::debug!(env = %self.app.env, cookie = %self.session.cookie_name, "configuration validated");
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
