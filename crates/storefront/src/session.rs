//! Auth session read from the request cookie.
//!
//! The session is independent of the cart. Pages read it to decide whether
//! checkout can proceed; the cart store never sees it.

use core::fmt;

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "mm_session";

/// A logged-in shopper's session token.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: String,
}

impl AuthSession {
    /// Find the session cookie in a `Cookie` header value.
    ///
    /// Returns `None` if the cookie is absent or empty.
    #[must_use]
    pub fn from_cookie_header(header: &str, cookie_name: &str) -> Option<Self> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == cookie_name)
            .map(|(_, value)| value.trim().trim_matches('"'))
            .filter(|value| !value.is_empty())
            .map(|value| Self {
                token: value.to_owned(),
            })
    }

    /// The raw session token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_cookie_among_others() {
        let session =
            AuthSession::from_cookie_header("theme=dark; mm_session=abc123; lang=en", "mm_session")
                .unwrap();
        assert_eq!(session.token(), "abc123");
    }

    #[test]
    fn test_quoted_value() {
        let session = AuthSession::from_cookie_header("mm_session=\"q1\"", "mm_session").unwrap();
        assert_eq!(session.token(), "q1");
    }

    #[test]
    fn test_missing_or_empty() {
        assert!(AuthSession::from_cookie_header("theme=dark", "mm_session").is_none());
        assert!(AuthSession::from_cookie_header("mm_session=", "mm_session").is_none());
        assert!(AuthSession::from_cookie_header("", "mm_session").is_none());
    }

    #[test]
    fn test_prefix_name_does_not_match() {
        assert!(AuthSession::from_cookie_header("mm_session_old=x", "mm_session").is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = AuthSession::from_cookie_header("mm_session=s3cr3t", "mm_session").unwrap();
        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("s3cr3t"));
    }
}
