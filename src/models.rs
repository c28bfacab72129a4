use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Model,
}

impl TryFrom<&str> for MessageRole {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "model" | "assistant" => Ok(MessageRole::Model),
            other => Err(other.to_string()),
        }
    }
}

/// One validated conversation turn. Only lives for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
}

impl Message {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self { role, text: text.into() }
    }
}

/// Body of `POST /api/chat`.
///
/// Both fields are kept loosely typed so that shape errors are reported with
/// the endpoint's own messages instead of a serde rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub conversation: Value,
    #[serde(default)]
    pub model: Value,
}

impl ChatRequest {
    /// The requested model, if the client sent one as a string.
    pub fn requested_model(&self) -> Option<&str> {
        self.model.as_str()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
