//! Session cookie carrier
//!
//! Maps a signed session token to and from the `Set-Cookie` / `Cookie` headers.
//! The cookie only transports the token; clearing it does not revoke anything.

use std::fmt;

use appdrop_shared::constants::{
    CLEARED_COOKIE_MAX_AGE, DEFAULT_COOKIE_NAME, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_PATH,
};
use appdrop_shared::utils::strip_port;
use http::header::{InvalidHeaderValue, COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age: i64,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub domain: String,
}

impl SessionCookie {
    pub fn is_cleared(&self) -> bool {
        self.value.is_empty() && self.max_age < 0
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path={}", self.name, self.value, self.path)?;
        if !self.domain.is_empty() {
            write!(f, "; Domain={}", self.domain)?;
        }
        // A negative max-age is sent as zero, which tells clients to drop the cookie now.
        write!(f, "; Max-Age={}", self.max_age.max(0))?;
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        write!(f, "; SameSite={}", self.same_site.as_str())
    }
}

/// Writes and reads the named session cookie.
#[derive(Debug, Clone)]
pub struct SessionCarrier {
    cookie_name: String,
}

impl Default for SessionCarrier {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME)
    }
}

impl SessionCarrier {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self { cookie_name: cookie_name.into() }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn session_cookie(&self, token: &str, request_host: &str, secure: bool) -> SessionCookie {
        self.build(token.to_string(), SESSION_COOKIE_MAX_AGE, request_host, secure)
    }

    pub fn cleared_cookie(&self, request_host: &str, secure: bool) -> SessionCookie {
        self.build(String::new(), CLEARED_COOKIE_MAX_AGE, request_host, secure)
    }

    /// Appends a `Set-Cookie` carrying `token`, scoped to the request host.
    pub fn attach(
        &self,
        headers: &mut HeaderMap,
        token: &str,
        request_host: &str,
        secure: bool,
    ) -> Result<(), InvalidHeaderValue> {
        let cookie = self.session_cookie(token, request_host, secure);
        headers.append(SET_COOKIE, HeaderValue::from_str(&cookie.to_string())?);
        Ok(())
    }

    /// Appends a `Set-Cookie` that makes clients discard the session cookie.
    pub fn clear(
        &self,
        headers: &mut HeaderMap,
        request_host: &str,
        secure: bool,
    ) -> Result<(), InvalidHeaderValue> {
        let cookie = self.cleared_cookie(request_host, secure);
        headers.append(SET_COOKIE, HeaderValue::from_str(&cookie.to_string())?);
        Ok(())
    }

    /// Returns the session cookie value from the request, if any.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|raw| raw.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| unquote(value.trim()).to_string())
    }

    fn build(&self, value: String, max_age: i64, request_host: &str, secure: bool) -> SessionCookie {
        SessionCookie {
            name: self.cookie_name.clone(),
            value,
            path: SESSION_COOKIE_PATH.to_string(),
            max_age,
            http_only: true,
            secure,
            same_site: SameSite::Lax,
            domain: cookie_domain(request_host).unwrap_or_default().to_string(),
        }
    }
}

/// Request host without its port, if it is usable as a cookie `Domain`.
///
/// Only dot-separated LDH labels qualify (this includes IPv4 literals). Anything
/// else, such as bracketed IPv6 or a host carrying `;`, yields `None` and the
/// attribute is left off so the cookie stays host-only.
fn cookie_domain(request_host: &str) -> Option<&str> {
    let host = strip_port(request_host.trim());
    if host.is_empty() || host.len() > 253 {
        return None;
    }
    let valid = host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    });
    valid.then_some(host)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let carrier = SessionCarrier::default();
        let cookie = carrier.session_cookie("tok", "acme.example.com:8082", false);

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "tok");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.max_age, 86_400);
        assert!(cookie.http_only);
        assert!(!cookie.secure);
        assert_eq!(cookie.same_site, SameSite::Lax);
        assert_eq!(cookie.domain, "acme.example.com");
    }

    #[test]
    fn test_attach_writes_set_cookie() {
        let carrier = SessionCarrier::new("sid");
        let mut headers = HeaderMap::new();
        carrier.attach(&mut headers, "tok", "localhost:8082", true).unwrap();

        let header = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert_eq!(
            header,
            "sid=tok; Path=/; Domain=localhost; Max-Age=86400; HttpOnly; Secure; SameSite=Lax"
        );
    }

    #[test]
    fn test_clear_is_idempotent() {
        let carrier = SessionCarrier::default();
        let first = carrier.cleared_cookie("acme.example.com", false);
        let second = carrier.cleared_cookie("acme.example.com", false);
        assert_eq!(first, second);
        assert!(first.is_cleared());
        assert_eq!(first.max_age, -1);

        let mut headers = HeaderMap::new();
        carrier.clear(&mut headers, "acme.example.com", false).unwrap();
        carrier.clear(&mut headers, "acme.example.com", false).unwrap();
        let values: Vec<_> = headers.get_all(SET_COOKIE).iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], values[1]);
        assert_eq!(
            values[0].to_str().unwrap(),
            "session=; Path=/; Domain=acme.example.com; Max-Age=0; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_host_with_attribute_injection_omits_domain() {
        let carrier = SessionCarrier::default();
        let cookie = carrier.session_cookie("tok", "acmeco.example.com; Domain=example.com", false);
        assert_eq!(cookie.domain, "");

        let mut headers = HeaderMap::new();
        carrier
            .attach(&mut headers, "tok", "acmeco.example.com; Domain=example.com", false)
            .unwrap();
        let header = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert_eq!(header, "session=tok; Path=/; Max-Age=86400; HttpOnly; SameSite=Lax");
        assert!(!header.contains("Domain"));
    }

    #[test]
    fn test_unusable_hosts_omit_domain() {
        let carrier = SessionCarrier::default();
        for host in ["[::1]:8082", "[::1]", "", "bad_host.example.com", "-acme.example.com", "acme..com"] {
            assert_eq!(carrier.session_cookie("tok", host, false).domain, "", "{host:?}");
            assert_eq!(carrier.cleared_cookie(host, false).domain, "", "{host:?}");
        }
    }

    #[test]
    fn test_ipv4_and_plain_hosts_keep_domain() {
        let carrier = SessionCarrier::default();
        assert_eq!(carrier.session_cookie("tok", "127.0.0.1:8082", false).domain, "127.0.0.1");
        assert_eq!(carrier.session_cookie("tok", " localhost ", false).domain, "localhost");
        assert_eq!(carrier.session_cookie("tok", "Acme-Co.example.com", false).domain, "Acme-Co.example.com");
    }

    #[test]
    fn test_read_finds_named_cookie() {
        let carrier = SessionCarrier::default();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; session=abc.def.ghi; lang=en"));

        assert_eq!(carrier.read(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_read_across_multiple_cookie_headers() {
        let carrier = SessionCarrier::new("sid");
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("sid=\"quoted\""));

        assert_eq!(carrier.read(&headers).as_deref(), Some("quoted"));
    }

    #[test]
    fn test_read_absent_is_none() {
        let carrier = SessionCarrier::default();
        let mut headers = HeaderMap::new();
        assert_eq!(carrier.read(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("sessionx=1; other=2"));
        assert_eq!(carrier.read(&headers), None);
    }
}
