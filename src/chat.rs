//! Chat sessions.
//!
//! A [`ChatSession`] binds one conversation id to the shared client and
//! turns "send a message" into a stream of [`StreamEvent`]s.

use futures::Stream;
use futures_util::StreamExt;
use std::pin::Pin;

use crate::client::KimiClient;
use crate::error::{KimiError, KimiResult};
use crate::models::CompletionRequest;
use crate::sse::{decode_stream, StreamEvent};
use crate::traits::Request;

/// Events of one answer, in arrival order.
pub type EventStream = Pin<Box<dyn Stream<Item = KimiResult<StreamEvent>> + Send>>;

/// One conversation on the service.
///
/// Created by [`KimiClient::create_chat`]. Many sessions may share a client;
/// they all stop working once it is closed.
#[derive(Debug, Clone)]
pub struct ChatSession {
    conversation_id: String,
    client: KimiClient,
    base_url: String,
}

impl ChatSession {
    pub(crate) fn new(conversation_id: String, client: KimiClient, base_url: String) -> Self {
        Self {
            conversation_id,
            client,
            base_url,
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Completion endpoint for this conversation.
    pub fn stream_url(&self) -> String {
        format!("{}/chat/{}/completion/stream", self.base_url, self.conversation_id)
    }

    /// Send a message and stream the answer.
    ///
    /// The request is issued before this returns; the events are decoded as
    /// they arrive. Dropping the stream closes the connection, and so does
    /// closing the client, even while a read is pending.
    pub async fn send(&self, request: &CompletionRequest) -> KimiResult<EventStream> {
        let payload = serde_json::to_value(request.to_payload())?;
        tracing::info!(
            "Sending stream request to chat {} with use_search={}",
            self.conversation_id,
            request.use_search
        );
        tracing::debug!("Request payload: {}", payload);

        let body = self
            .client
            .execute_stream(Request::post_json(self.stream_url(), payload))
            .await?;

        // The state drops to None after an error, releasing the connection
        let state = Some((Box::pin(decode_stream(body)), self.client.clone()));
        let events = futures_util::stream::unfold(state, |state| async move {
            let (mut events, client) = state?;
            let item = tokio::select! {
                biased;
                _ = client.closed() => Err(KimiError::ClientClosed),
                item = events.next() => item?,
            };
            let next = if item.is_ok() { Some((events, client)) } else { None };
            Some((item, next))
        });

        Ok(Box::pin(events))
    }

    /// Send a message and collect the whole answer.
    pub async fn send_and_collect(&self, request: &CompletionRequest) -> KimiResult<Vec<StreamEvent>> {
        let mut stream = self.send(request).await?;
        let mut events = Vec::new();
        while let Some(event) = stream.next().await {
            events.push(event?);
        }
        Ok(events)
    }
}
