//! Application-wide constants

/// Header that overrides subdomain-based brand resolution.
pub const BRAND_DOMAIN_HEADER: &str = "X-Brand-Domain";
/// Subdomain label that never identifies a brand.
pub const RESERVED_SUBDOMAIN: &str = "www";

pub const DEFAULT_COOKIE_NAME: &str = "session";
pub const SESSION_COOKIE_PATH: &str = "/";
pub const SESSION_COOKIE_MAX_AGE: i64 = 86_400;
pub const CLEARED_COOKIE_MAX_AGE: i64 = -1;

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;
pub const DEFAULT_PORT: u16 = 8082;
