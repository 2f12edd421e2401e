//! Streaming chat assistant over HTTP
//!
//! Talks to an Ollama-compatible chat endpoint and exposes the response as a
//! stream of text deltas.

use application::{
    error::ApplicationError,
    ports::{Assistant, DeltaStream, TextDelta},
};
use async_trait::async_trait;
use domain::{ChatMessage, Sender};
use futures::{StreamExt, stream};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::config::AssistantConfig;

/// HTTP client for the assistant backend
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    client: Client,
    config: AssistantConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// One NDJSON line of the streamed chat response
#[derive(Debug, Deserialize)]
struct StreamChunk {
    message: StreamMessage,
    done: bool,
}

#[derive(Debug, Deserialize)]
struct StreamMessage {
    content: String,
}

impl HttpAssistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_request(&self, transcript: &[ChatMessage], message: &str) -> ChatRequest {
        let mut messages = Vec::with_capacity(transcript.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: self.config.system_prompt.clone(),
        });
        for entry in transcript {
            messages.push(WireMessage {
                role: match entry.sender {
                    Sender::User => "user",
                    Sender::Bot => "assistant",
                },
                content: entry.text.clone(),
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: message.to_string(),
        });

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            stream: true,
        }
    }
}

#[async_trait]
impl Assistant for HttpAssistant {
    #[instrument(skip(self, transcript, message), fields(history = transcript.len()))]
    async fn send(
        &self,
        transcript: &[ChatMessage],
        message: &str,
    ) -> Result<DeltaStream, ApplicationError> {
        let url = format!("{}/api/chat", self.config.base_url.trim_end_matches('/'));
        let body = self.build_request(transcript, message);

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::Assistant(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Assistant(format!(
                "assistant returned status {}",
                response.status()
            )));
        }

        debug!(url = %url, "Assistant stream opened");

        let deltas = response
            .bytes_stream()
            .map(|result| match result {
                Ok(bytes) => parse_chunks(&bytes),
                Err(e) => vec![Err(ApplicationError::Assistant(format!(
                    "stream error: {e}"
                )))],
            })
            .flat_map(stream::iter);

        Ok(Box::pin(deltas))
    }
}

/// Parse NDJSON chunks from a byte frame into text deltas
fn parse_chunks(bytes: &[u8]) -> Vec<Result<TextDelta, ApplicationError>> {
    let text = match std::str::from_utf8(bytes) {
        Ok(t) => t,
        Err(e) => {
            return vec![Err(ApplicationError::Assistant(format!(
                "invalid UTF-8 in stream: {e}"
            )))];
        },
    };

    text.lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            trace!(line = %line, "Parsing stream chunk");

            let chunk: StreamChunk = serde_json::from_str(line)
                .map_err(|e| ApplicationError::Assistant(format!("JSON parse error: {e}")))?;

            Ok(TextDelta {
                content: chunk.message.content,
                done: chunk.done,
            })
        })
        .collect()
}
