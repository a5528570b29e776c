//! Reqwest-based HTTP transport adapter.
//!
//! This module provides the production transport, implementing the
//! [`HttpTransport`] trait from `crate::traits` on top of a single
//! long-lived `reqwest::Client` with a cookie store.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::cookie::Jar;
use std::sync::Arc;

use crate::auth::Cookie;
use crate::config::SessionConfig;
use crate::traits::{ByteStream, Headers, HttpError, HttpTransport, Method, Request, RequestBody, Response};

/// HTTP transport implementation using reqwest.
///
/// Owns the connection pool, the cookie store, the timeout and the proxy
/// settings. Default headers are not stored here: the client attaches them
/// to every [`Request`] before it reaches the transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl ReqwestTransport {
    /// Build a transport from the session configuration.
    pub fn from_config(config: &SessionConfig) -> Result<Self, HttpError> {
        let jar = Arc::new(Jar::default());
        let mut builder = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(config.timeout)
            .connect_timeout(config.timeout);

        for (scheme, url) in &config.proxies {
            let proxy = match scheme.as_str() {
                "http" => reqwest::Proxy::http(url),
                "https" => reqwest::Proxy::https(url),
                "all" => reqwest::Proxy::all(url),
                other => {
                    return Err(HttpError::InvalidRequest(format!(
                        "Unsupported proxy scheme '{}'",
                        other
                    )))
                }
            }
            .map_err(|e| HttpError::InvalidRequest(format!("Invalid proxy '{}': {}", url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(Self::convert_error)?;
        Ok(Self { client, jar })
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidRequest(err.to_string())
        } else if err.is_body() || err.is_decode() {
            HttpError::Io(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    fn build(&self, request: Request) -> reqwest::RequestBuilder {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Raw(bytes) => builder.body(bytes),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response, HttpError> {
        let response = self
            .build(request)
            .send()
            .await
            .map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, headers, body))
    }

    async fn execute_stream(&self, request: Request) -> Result<ByteStream, HttpError> {
        let response = self
            .build(request)
            .send()
            .await
            .map_err(Self::convert_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status { status, body });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(Self::convert_error));

        Ok(Box::pin(stream))
    }

    fn merge_cookies(&self, cookies: &[Cookie]) {
        for cookie in cookies {
            match reqwest::Url::parse(&cookie.origin_url()) {
                Ok(url) => self.jar.add_cookie_str(&cookie.to_set_cookie(), &url),
                Err(e) => {
                    tracing::debug!(domain = %cookie.domain, "Skipping cookie with unusable domain: {}", e);
                }
            }
        }
    }
}
