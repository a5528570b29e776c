//! Engine configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Default Kimi API root.
pub const DEFAULT_BASE_URL: &str = "https://www.kimi.com/api";

/// Default browser profile to present as.
pub const DEFAULT_IMPERSONATE: &str = "chrome110";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// Configuration for a [`KimiClient`](crate::client::KimiClient).
///
/// Immutable once handed to the client. Use the builder methods to
/// customize it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use kimiai::config::SessionConfig;
///
/// let config = SessionConfig::new()
///     .with_cookies_path("/home/me/kimi-cookies.txt")
///     .with_timeout(Duration::from_secs(90))
///     .with_proxy("https", "http://127.0.0.1:8080");
///
/// assert_eq!(config.timeout, Duration::from_secs(90));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Netscape-format cookie file holding `kimi-auth`
    pub cookies_path: PathBuf,
    /// Browser profile the client presents as (e.g. `chrome110`)
    pub impersonate: String,
    /// Overall request timeout, also bounding connect time
    pub timeout: Duration,
    /// Proxies keyed by scheme: `http`, `https` or `all`. Proxy URLs may
    /// be `http://`, `https://`, `socks5://` or `socks5h://`.
    pub proxies: HashMap<String, String>,
    /// API root, without a trailing slash
    pub base_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookies_path: PathBuf::from("cookies.txt"),
            impersonate: DEFAULT_IMPERSONATE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxies: HashMap::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a new SessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cookie file path.
    pub fn with_cookies_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookies_path = path.into();
        self
    }

    /// Set the browser impersonation profile.
    pub fn with_impersonate(mut self, profile: impl Into<String>) -> Self {
        self.impersonate = profile.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a proxy for a scheme (`http`, `https` or `all`).
    pub fn with_proxy(mut self, scheme: impl Into<String>, url: impl Into<String>) -> Self {
        self.proxies.insert(scheme.into(), url.into());
        self
    }

    /// Replace the whole proxy map.
    pub fn with_proxies(mut self, proxies: HashMap<String, String>) -> Self {
        self.proxies = proxies;
        self
    }

    /// Point the client at another API root (used by tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build an endpoint URL below the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
