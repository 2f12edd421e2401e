//! Chat message entity for the applicant help assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The applicant typing into the panel
    User,
    /// The streaming assistant
    Bot,
}

/// A single message in the assistant transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a bot message, usually empty and grown as deltas arrive
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Append a streamed text delta
    pub fn append(&mut self, delta: &str) {
        self.text.push_str(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_user_sender() {
        let msg = ChatMessage::user("How do I join?");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "How do I join?");
    }

    #[test]
    fn deltas_accumulate() {
        let mut msg = ChatMessage::bot("");
        msg.append("You can ");
        msg.append("apply online.");
        assert_eq!(msg.text, "You can apply online.");
    }

    #[test]
    fn sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }
}
