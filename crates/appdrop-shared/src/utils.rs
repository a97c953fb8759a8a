//! Utility functions

/// Strips a trailing `:port` from a request host.
///
/// Bracketed IPv6 literals keep their brackets: `[::1]:8080` becomes `[::1]`.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.find(':') {
        Some(idx) => &host[..idx],
        None => host,
    }
}

/// Canonical form of a brand domain key: trimmed and lowercased.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("acme.example.com:8082"), "acme.example.com");
        assert_eq!(strip_port("acme.example.com"), "acme.example.com");
        assert_eq!(strip_port("localhost:3000"), "localhost");
        assert_eq!(strip_port("[::1]:8080"), "[::1]");
        assert_eq!(strip_port(""), "");
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("  AcmeCo "), "acmeco");
        assert_eq!(normalize_domain("acmeco"), "acmeco");
    }
}
