//! Bearer credential extraction.
//!
//! The Kimi web app keeps its access token in the `kimi-auth` cookie. The
//! engine reads it once from the exported cookie file and presents it as a
//! bearer token on every request.

use std::path::Path;

use super::cookies::CookieJar;
use crate::error::AuthError;

/// Name of the cookie carrying the bearer token.
pub const AUTH_COOKIE_NAME: &str = "kimi-auth";

/// An opaque, non-empty bearer token.
///
/// The token never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token. Returns `None` for an empty or blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Pull the credential out of a parsed jar.
pub fn extract_credential(jar: &CookieJar, name: &str) -> Result<Credential, AuthError> {
    jar.get(name)
        .and_then(|cookie| Credential::new(cookie.value.clone()))
        .ok_or_else(|| AuthError::TokenMissing {
            name: name.to_string(),
        })
}

/// Load a cookie file and extract the `kimi-auth` credential.
///
/// Returns the full jar as well so the caller can seed its cookie store.
pub async fn load_credential(path: &Path) -> Result<(CookieJar, Credential), AuthError> {
    let jar = CookieJar::load(path).await?;
    let credential = extract_credential(&jar, AUTH_COOKIE_NAME)?;
    tracing::info!(cookies = jar.len(), "Authorization token loaded");
    Ok((jar, credential))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_cookie_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_credential_rejects_empty() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert!(Credential::new("tok").is_some());
    }

    #[test]
    fn test_bearer_format() {
        let credential = Credential::new("abc.def").unwrap();
        assert_eq!(credential.bearer(), "Bearer abc.def");
        assert_eq!(credential.as_str(), "abc.def");
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("secret-token").unwrap();
        assert_eq!(format!("{:?}", credential), "Credential([REDACTED])");
    }

    #[test]
    fn test_extract_missing_token() {
        let jar = CookieJar::parse(".kimi.com\tTRUE\t/\tTRUE\t0\tother\tx\n").unwrap();
        let err = extract_credential(&jar, AUTH_COOKIE_NAME).unwrap_err();
        assert!(matches!(err, AuthError::TokenMissing { ref name } if name == "kimi-auth"));
    }

    #[test]
    fn test_extract_empty_token_is_missing() {
        let jar = CookieJar::parse(".kimi.com\tTRUE\t/\tTRUE\t0\tkimi-auth\t\n").unwrap();
        assert!(extract_credential(&jar, AUTH_COOKIE_NAME).is_err());
    }

    #[tokio::test]
    async fn test_load_credential_from_file() {
        let file = write_cookie_file(
            "# Netscape HTTP Cookie File\n.kimi.com\tTRUE\t/\tTRUE\t0\tkimi-auth\ttoken-123\n",
        );
        let (jar, credential) = load_credential(file.path()).await.unwrap();
        assert_eq!(jar.len(), 1);
        assert_eq!(credential.bearer(), "Bearer token-123");
    }

    #[tokio::test]
    async fn test_load_credential_parse_failure() {
        let file = write_cookie_file("garbage\n");
        let err = load_credential(file.path()).await.unwrap_err();
        assert!(matches!(err, AuthError::CookieParse { .. }));
    }
}
