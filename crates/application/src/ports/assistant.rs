//! Assistant port - streaming text completion for the help panel

use std::pin::Pin;

use async_trait::async_trait;
use domain::ChatMessage;
use futures::Stream;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// An incremental piece of assistant output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDelta {
    /// Content delta to append to the transcript
    pub content: String,
    /// Whether this is the final chunk
    pub done: bool,
}

impl TextDelta {
    /// A content chunk mid-stream
    pub fn chunk(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            done: false,
        }
    }

    /// The terminating chunk
    pub fn finished() -> Self {
        Self {
            content: String::new(),
            done: true,
        }
    }
}

/// Type alias for a stream of assistant text deltas
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<TextDelta, ApplicationError>> + Send>>;

/// Port for the conversational assistant
///
/// The caller supplies the transcript so far plus the new user message and
/// receives the reply as a stream of deltas. Cancellation is dropping the
/// stream; there is no explicit cancellation token.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Send a message and stream back the reply
    async fn send(
        &self,
        transcript: &[ChatMessage],
        message: &str,
    ) -> Result<DeltaStream, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_is_not_done() {
        let delta = TextDelta::chunk("hello");
        assert_eq!(delta.content, "hello");
        assert!(!delta.done);
    }

    #[test]
    fn finished_is_empty_and_done() {
        let delta = TextDelta::finished();
        assert!(delta.content.is_empty());
        assert!(delta.done);
    }
}
