//! Help-panel assistant service
//!
//! Keeps the conversation transcript and streams replies. Each delta is
//! appended to the trailing bot message as it arrives, so the transcript is
//! always as complete as what the user has seen. The user closing the panel
//! simply drops the stream; whatever arrived stays recorded.

use std::sync::Arc;

use domain::ChatMessage;
use futures::StreamExt;
use parking_lot::RwLock;
use tracing::instrument;

use crate::{
    error::ApplicationError,
    ports::{Assistant, DeltaStream},
};

/// Service owning the assistant transcript
pub struct AssistantService {
    assistant: Arc<dyn Assistant>,
    transcript: Arc<RwLock<Vec<ChatMessage>>>,
}

impl std::fmt::Debug for AssistantService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantService").finish_non_exhaustive()
    }
}

impl AssistantService {
    /// Create a service with an empty transcript
    pub fn new(assistant: Arc<dyn Assistant>) -> Self {
        Self {
            assistant,
            transcript: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Send a user message and stream the reply
    ///
    /// The user message and an initially empty bot message are recorded
    /// before the stream is returned; deltas flow into the bot message as
    /// the caller polls.
    #[instrument(skip(self, message))]
    pub async fn send(&self, message: impl Into<String>) -> Result<DeltaStream, ApplicationError> {
        let message = message.into();

        let history = {
            let mut transcript = self.transcript.write();
            let history = transcript.clone();
            transcript.push(ChatMessage::user(message.clone()));
            history
        };

        let stream = self.assistant.send(&history, &message).await?;
        self.transcript.write().push(ChatMessage::bot(""));

        let transcript = Arc::clone(&self.transcript);
        Ok(Box::pin(stream.map(move |item| {
            if let Ok(delta) = &item {
                if !delta.content.is_empty() {
                    let mut transcript = transcript.write();
                    if let Some(last) = transcript.last_mut() {
                        last.append(&delta.content);
                    }
                }
            }
            item
        })))
    }

    /// Snapshot of the transcript so far
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.read().clone()
    }

    /// Forget the conversation
    pub fn clear(&self) {
        self.transcript.write().clear();
    }
}
