//! Assistant backend configuration.

use serde::{Deserialize, Serialize};

/// Streaming assistant backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Base URL of the chat completion endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional bearer token for the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// System instruction framing the assistant's role
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen2.5-1.5b-instruct".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful and encouraging assistant for a community membership \
     organization. Answer questions about the joining process concisely and \
     clearly; do not express personal opinions."
        .to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            system_prompt: default_system_prompt(),
        }
    }
}
