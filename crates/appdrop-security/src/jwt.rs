//! Session token handling
//!
//! Tokens are HS256 JWTs carrying the brand id and the user id. Time bounds
//! are checked against the codec's [`Clock`] rather than inside `jsonwebtoken`
//! so that verification is deterministic for a given secret and clock.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use appdrop_shared::constants::DEFAULT_TOKEN_TTL_SECS;

use crate::clock::{Clock, SystemClock};

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing secret is not configured")]
    Config,
    #[error("Token creation failed: {0}")]
    Creation(String),
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token expired")]
    Expired,
    #[error("Token not yet valid")]
    NotYetValid,
    #[error("Token malformed: {0}")]
    Malformed(String),
}

/// Claims carried by a session token. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "brand_id")]
    pub tenant_id: Uuid,
    #[serde(rename = "user_id")]
    pub subject_id: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "nbf")]
    pub not_before: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

pub fn default_token_duration() -> Duration {
    Duration::seconds(DEFAULT_TOKEN_TTL_SECS)
}

/// Issues and verifies session tokens with a process-wide symmetric secret.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl SessionTokenCodec {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        if secret.trim().is_empty() {
            return Err(TokenError::Config);
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf", "iat"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        })
    }

    /// Signs a token for `subject_id` within `tenant_id`.
    ///
    /// A missing or non-positive `duration` falls back to 24 hours.
    pub fn issue(
        &self,
        tenant_id: Uuid,
        subject_id: &str,
        duration: Option<Duration>,
    ) -> Result<String, TokenError> {
        let duration = duration
            .filter(|d| *d > Duration::zero())
            .unwrap_or_else(default_token_duration);
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(duration)
            .ok_or_else(|| TokenError::Creation(format!("token lifetime out of range: {}", duration)))?;
        let claims = SessionClaims {
            tenant_id,
            subject_id: subject_id.to_string(),
            issued_at: now.timestamp(),
            not_before: now.timestamp(),
            expires_at: expires_at.timestamp(),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed(e.to_string()),
            })?;

        let now = self.clock.now().timestamp();
        if now < claims.not_before {
            return Err(TokenError::NotYetValid);
        }
        if now >= claims.expires_at {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}
