//! The Kimi client engine.
//!
//! [`KimiClient`] owns the transport, the default headers and the cookie
//! store. It is a cheap handle: clones share one inner state, so closing any
//! clone closes them all.
//!
//! The session is set up once. Until then the client is uninitialized, and
//! the first operation (or an explicit [`KimiClient::open`]) loads the cookie
//! file, seeds the cookie store and fixes the headers. After
//! [`KimiClient::close`] every operation fails with
//! [`KimiError::ClientClosed`], including requests and streams that were
//! already in flight. A closed client is never reinitialized.

pub mod headers;

use bytes::Bytes;
use serde::Serialize;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

use crate::adapters::ReqwestTransport;
use crate::auth::load_credential;
use crate::chat::ChatSession;
use crate::config::SessionConfig;
use crate::error::{ApiError, KimiError, KimiResult};
use crate::models::{CreateChatRequest, CreateChatResponse, UploadedFile, DEFAULT_CHAT_NAME};
use crate::traits::{ByteStream, Headers, HttpError, HttpTransport, Request, Response};

pub use headers::{default_headers, user_agent_for, SessionIds};

/// Lifecycle of a client.
#[derive(Debug, Clone)]
enum ClientState {
    Uninitialized,
    Ready(Arc<Headers>),
    Closed,
}

struct Inner {
    config: SessionConfig,
    transport: Arc<dyn HttpTransport>,
    state: RwLock<ClientState>,
    closed: watch::Sender<bool>,
}

/// Handle to a Kimi web-chat session.
///
/// # Example
///
/// ```no_run
/// use kimiai::client::KimiClient;
/// use kimiai::config::SessionConfig;
/// use kimiai::models::CompletionRequest;
/// use futures::StreamExt;
///
/// # async fn run() -> kimiai::error::KimiResult<()> {
/// let client = KimiClient::new(SessionConfig::new().with_cookies_path("cookies.txt"))?;
/// let chat = client.create_chat("Rust questions").await?;
///
/// let mut events = chat.send(&CompletionRequest::new("What is a lifetime?")).await?;
/// while let Some(event) = events.next().await {
///     if let Some(text) = event?.text() {
///         print!("{}", text);
///     }
/// }
/// client.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct KimiClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for KimiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KimiClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl KimiClient {
    /// Create a client backed by reqwest.
    ///
    /// No I/O happens here. Fails only if the configuration cannot produce a
    /// transport, e.g. an invalid proxy URL.
    pub fn new(config: SessionConfig) -> KimiResult<Self> {
        let transport = ReqwestTransport::from_config(&config)
            .map_err(|e| KimiError::internal_with("Invalid client configuration", e))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over any transport.
    pub fn with_transport(config: SessionConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                config,
                transport,
                state: RwLock::new(ClientState::Uninitialized),
                closed,
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Initialize the session now instead of on first use.
    pub async fn open(&self) -> KimiResult<()> {
        self.session_headers().await.map(|_| ())
    }

    /// Close the client. Idempotent.
    ///
    /// Requests in flight are abandoned and fail with
    /// [`KimiError::ClientClosed`]; streams already handed out yield that
    /// error once and drop their connection.
    pub async fn close(&self) {
        let mut state = self.inner.state.write().await;
        if !matches!(*state, ClientState::Closed) {
            *state = ClientState::Closed;
            self.inner.closed.send_replace(true);
            tracing::info!("Kimi client closed");
        }
    }

    pub async fn is_closed(&self) -> bool {
        matches!(*self.inner.state.read().await, ClientState::Closed)
    }

    /// Whether the session has been initialized and not closed.
    pub async fn is_ready(&self) -> bool {
        matches!(*self.inner.state.read().await, ClientState::Ready(_))
    }

    /// Resolves once the client is closed, immediately if it already is.
    pub(crate) fn closed(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.inner.closed.subscribe();
        async move {
            // Err only once the last handle dropped the sender
            let _ = rx.wait_for(|closed| *closed).await;
        }
    }

    /// Headers of the live session, initializing it if needed.
    async fn session_headers(&self) -> KimiResult<Arc<Headers>> {
        match &*self.inner.state.read().await {
            ClientState::Ready(headers) => return Ok(Arc::clone(headers)),
            ClientState::Closed => return Err(KimiError::ClientClosed),
            ClientState::Uninitialized => {}
        }

        let mut state = self.inner.state.write().await;
        match &*state {
            ClientState::Ready(headers) => Ok(Arc::clone(headers)),
            ClientState::Closed => Err(KimiError::ClientClosed),
            ClientState::Uninitialized => {
                let headers = Arc::new(self.initialize().await?);
                *state = ClientState::Ready(Arc::clone(&headers));
                Ok(headers)
            }
        }
    }

    async fn initialize(&self) -> KimiResult<Headers> {
        let config = &self.inner.config;
        tracing::info!("Initializing Kimi client session");

        let (jar, credential) = load_credential(&config.cookies_path).await?;
        self.inner.transport.merge_cookies(jar.cookies());

        let ids = SessionIds::generate();
        let headers = default_headers(&config.impersonate, &ids, &credential);
        tracing::info!("Session initialized successfully");
        Ok(headers)
    }

    /// Execute a request with the session headers.
    ///
    /// A transport failure or a non-2xx status becomes an [`ApiError`].
    pub async fn execute(&self, request: Request) -> KimiResult<Response> {
        let headers = self.session_headers().await?;
        let request = request.with_default_headers(&headers);
        let url = request.url.clone();

        let result = tokio::select! {
            biased;
            _ = self.closed() => {
                tracing::debug!("Request to {} abandoned: client closed", url);
                return Err(KimiError::ClientClosed);
            }
            result = self.inner.transport.execute(request) => result,
        };

        result
            .and_then(Response::error_for_status)
            .map_err(|e| KimiError::from(api_error("API request failed", &url, e)))
    }

    /// Execute a request and return the body as a byte stream.
    pub async fn execute_stream(&self, request: Request) -> KimiResult<ByteStream> {
        let headers = self.session_headers().await?;
        let request = request.with_default_headers(&headers);
        let url = request.url.clone();

        let result = tokio::select! {
            biased;
            _ = self.closed() => {
                tracing::debug!("Stream request to {} abandoned: client closed", url);
                return Err(KimiError::ClientClosed);
            }
            result = self.inner.transport.execute_stream(request) => result,
        };

        result.map_err(|e| KimiError::from(api_error("Stream API request failed", &url, e)))
    }

    /// POST a JSON body to an endpoint below the API root.
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> KimiResult<Response> {
        let body = serde_json::to_value(body)?;
        self.execute(Request::post_json(self.inner.config.endpoint(path), body))
            .await
    }

    /// PUT raw bytes to an absolute URL.
    pub async fn put_bytes(&self, url: &str, bytes: Bytes) -> KimiResult<Response> {
        let request = Request::put_bytes(url, bytes)
            .with_header("Content-Type", "application/octet-stream");
        self.execute(request).await
    }

    /// Create a conversation on the service.
    pub async fn create_chat(&self, name: &str) -> KimiResult<ChatSession> {
        tracing::info!("Creating new chat: {}", name);

        let response = self
            .post_json("chat", &CreateChatRequest::new(name))
            .await?;
        let chat: CreateChatResponse = response.json()?;

        tracing::info!("Successfully created chat with ID: {}", chat.id);
        Ok(ChatSession::new(
            chat.id,
            self.clone(),
            self.inner.config.base_url.clone(),
        ))
    }

    /// Create a conversation named "New Chat".
    pub async fn create_chat_default(&self) -> KimiResult<ChatSession> {
        self.create_chat(DEFAULT_CHAT_NAME).await
    }

    /// Upload a local file so it can be referenced from a prompt.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> KimiResult<UploadedFile> {
        crate::upload::upload_file(self, path.as_ref()).await
    }
}

fn api_error(message: &str, url: &str, err: HttpError) -> ApiError {
    let err = ApiError::from_http(message, err);
    tracing::error!(
        "API request to {} failed with status {}. Response: {}",
        url,
        err.status(),
        err.body()
    );
    err
}
