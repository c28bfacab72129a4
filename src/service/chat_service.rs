use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::agent::CompletionProvider;
use crate::errors::AppError;
use crate::models::{ChatRequest, ChatResponse, Message, MessageRole};
use crate::service::model_selector::ModelSelector;

/// Checks the raw `conversation` value and converts it into typed messages.
/// Any invalid element rejects the whole conversation.
pub fn validate_conversation(raw: &Value) -> Result<Vec<Message>, AppError> {
    let items = raw.as_array().ok_or(AppError::NotAnArray)?;
    if items.is_empty() {
        return Err(AppError::EmptyConversation);
    }

    items
        .iter()
        .map(|item| {
            let text = item
                .get("text")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .ok_or(AppError::MissingText)?;

            let role_raw = item.get("role").and_then(Value::as_str).unwrap_or_default();
            let role = MessageRole::try_from(role_raw)
                .map_err(|_| AppError::UnknownRole { role: role_raw.to_string() })?;

            Ok(Message::new(role, text))
        })
        .collect()
}

/// Stateless chat pipeline: validate, select a model, call the provider.
#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn CompletionProvider>,
    selector: ModelSelector,
    temperature: f64,
}

impl ChatService {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        selector: ModelSelector,
        temperature: f64,
    ) -> Self {
        Self { provider, selector, temperature }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        let outcome = self.run(&request).await;
        match &outcome {
            Ok(resp) => info!(
                "[Chat Success] Generated response length: {}",
                resp.result.chars().count()
            ),
            Err(e) => error!("[Chat Error] {e}"),
        }
        outcome
    }

    async fn run(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        let conversation = validate_conversation(&request.conversation)?;

        // ── Model selection ───────────────────────────────────────────────────
        let model = self.selector.select(request.requested_model());
        info!(
            "[Chat Request] Model: {model} | Temp: {} | Msgs: {}",
            self.temperature,
            conversation.len()
        );

        // ── Upstream call ─────────────────────────────────────────────────────
        let result = self
            .provider
            .complete(model, &conversation, self.temperature)
            .await?;

        Ok(ChatResponse { result })
    }
}
