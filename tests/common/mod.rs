//! Common test utilities for integration tests.
//!
//! Spins up a wiremock backend and points a real reqwest-backed client at
//! it, with a cookie file in a temporary directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use kimiai::{KimiClient, SessionConfig};
use tempfile::TempDir;
use wiremock::MockServer;

pub const TOKEN: &str = "test-kimi-auth-token";

/// Write a Netscape cookie file holding `kimi-auth` plus one unrelated cookie.
pub fn write_cookie_file(dir: &Path, token: &str) -> PathBuf {
    let path = dir.join("cookies.txt");
    let contents = format!(
        "# Netscape HTTP Cookie File\n\
# This is a generated file! Do not edit.\n\
\n\
.kimi.com\tTRUE\t/\tTRUE\t1893456000\tkimi-auth\t{}\n\
#HttpOnly_www.kimi.com\tFALSE\t/\tTRUE\t0\tsession_hint\tabc\n",
        token
    );
    std::fs::write(&path, contents).unwrap();
    path
}

/// A fake Kimi backend plus a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub client: KimiClient,
    pub dir: TempDir,
}

impl TestBackend {
    /// Start a backend with a valid cookie file.
    pub async fn start() -> Self {
        let dir = TempDir::new().unwrap();
        let cookies = write_cookie_file(dir.path(), TOKEN);
        Self::start_with_cookies(dir, cookies).await
    }

    /// Start a backend with an arbitrary cookie path.
    pub async fn start_with_cookies(dir: TempDir, cookies: PathBuf) -> Self {
        let server = MockServer::start().await;
        let config = SessionConfig::new()
            .with_cookies_path(cookies)
            .with_timeout(Duration::from_secs(10))
            .with_base_url(format!("{}/api", server.uri()));
        let client = KimiClient::new(config).unwrap();
        Self {
            server,
            client,
            dir,
        }
    }

    /// Absolute URL on the fake backend.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Create a file to upload.
    pub fn file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Number of requests the backend has seen.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

/// Render `data:` lines as an SSE body.
pub fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|p| format!("data: {}\n\n", p))
        .collect()
}
