use async_trait::async_trait;
use rig::completion::{Chat, CompletionError, PromptError};
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::gemini;
use tracing::error;

use crate::errors::AppError;
use crate::models::{Message, MessageRole};

/// System instruction sent with every request: answer in Indonesian only.
pub const SYSTEM_INSTRUCTION: &str = "Jawab hanya menggunakan bahasa Indonesia.";

/// The upstream generative-text call, kept behind a trait so the endpoint can
/// be exercised without network access.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        conversation: &[Message],
        temperature: f64,
    ) -> Result<String, AppError>;
}

fn to_rig_message(message: &Message) -> RigMessage {
    match message.role {
        MessageRole::User => RigMessage::user(&message.text),
        MessageRole::Model => RigMessage::assistant(&message.text),
    }
}

/// Splits a conversation into the rig prompt (its last turn) and the history
/// replayed before it.
fn to_rig_turns(conversation: &[Message]) -> Option<(RigMessage, Vec<RigMessage>)> {
    let (last, history) = conversation.split_last()?;
    Some((to_rig_message(last), history.iter().map(to_rig_message).collect()))
}

/// Keeps the provider's own error text so that callers can surface it as-is.
fn provider_message(err: PromptError) -> String {
    match err {
        PromptError::CompletionError(CompletionError::ProviderError(msg)) => msg,
        other => other.to_string(),
    }
}

/// [`CompletionProvider`] backed by the rig Gemini client.
/// An agent is built per request because model and temperature vary per call.
#[derive(Clone)]
pub struct GeminiAgentService {
    client: gemini::Client,
}

impl GeminiAgentService {
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        let client = gemini::Client::builder()
            .api_key(api_key)
            .build()
            .map_err(|e| AppError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CompletionProvider for GeminiAgentService {
    async fn complete(
        &self,
        model: &str,
        conversation: &[Message],
        temperature: f64,
    ) -> Result<String, AppError> {
        let (prompt, history) = to_rig_turns(conversation).ok_or(AppError::EmptyConversation)?;

        let agent = self
            .client
            .agent(model)
            .preamble(SYSTEM_INSTRUCTION)
            .temperature(temperature)
            .build();

        agent.chat(prompt, history).await.map_err(|e| {
            error!("Gemini request failed for model {model}: {e}");
            AppError::Provider { message: provider_message(e) }
        })
    }
}
