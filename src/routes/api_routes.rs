use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{ChatRequest, ChatResponse};
use crate::service::chat_service::ChatService;

/// POST `/api/chat` — validates the conversation, calls the provider and
/// returns `{ result }`, or `{ error }` with HTTP 500.
pub async fn chat_handler(
    State(svc): State<ChatService>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::InvalidBody(e.body_text()))?;
    svc.chat(request).await.map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::agent::CompletionProvider;
    use crate::config::{ALLOWED_MODELS, DEFAULT_MODEL};
    use crate::models::Message;
    use crate::routes::api_router;
    use crate::service::model_selector::ModelSelector;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        model: String,
        conversation: Vec<Message>,
        temperature: f64,
    }

    /// Records each call and answers with a canned outcome.
    struct StubProvider {
        reply: Result<String, String>,
        calls: Mutex<Vec<Call>>,
    }

    impl StubProvider {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self { reply: Ok(text.to_string()), calls: Mutex::new(Vec::new()) })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self { reply: Err(message.to_string()), calls: Mutex::new(Vec::new()) })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(
            &self,
            model: &str,
            conversation: &[Message],
            temperature: f64,
        ) -> Result<String, AppError> {
            self.calls.lock().unwrap().push(Call {
                model: model.to_string(),
                conversation: conversation.to_vec(),
                temperature,
            });
            self.reply
                .clone()
                .map_err(|message| AppError::Provider { message })
        }
    }

    fn app(provider: Arc<StubProvider>) -> Router {
        let svc = ChatService::new(provider, ModelSelector::new(ALLOWED_MODELS, DEFAULT_MODEL), 0.9);
        api_router(svc)
    }

    async fn post_chat(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn successful_call_returns_result() {
        let provider = StubProvider::answering("Halo! Ada yang bisa saya bantu?");
        let body = json!({"conversation": [{"role": "user", "text": "Halo"}]}).to_string();

        let (status, json) = post_chat(app(provider.clone()), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"result": "Halo! Ada yang bisa saya bantu?"}));
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, DEFAULT_MODEL);
        assert_eq!(calls[0].temperature, 0.9);
        assert_eq!(calls[0].conversation[0].text, "Halo");
    }

    #[tokio::test]
    async fn allow_listed_model_is_forwarded() {
        let provider = StubProvider::answering("ok");
        let body = json!({
            "conversation": [{"role": "user", "text": "Halo"}],
            "model": "gemini-2.0-flash",
        })
        .to_string();

        let (status, _) = post_chat(app(provider.clone()), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(provider.calls()[0].model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn unknown_model_falls_back_to_default() {
        let provider = StubProvider::answering("ok");
        let body = json!({
            "conversation": [{"role": "user", "text": "Halo"}],
            "model": "unknown-model",
        })
        .to_string();

        post_chat(app(provider.clone()), body).await;

        assert_eq!(provider.calls()[0].model, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn non_array_conversation_is_a_500_mentioning_array() {
        let provider = StubProvider::answering("unused");
        let body = json!({"conversation": "Halo"}).to_string();

        let (status, json) = post_chat(app(provider.clone()), body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("array"));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_upstream() {
        let provider = StubProvider::answering("unused");
        let body = json!({
            "conversation": [
                {"role": "user", "text": "Halo"},
                {"role": "user", "text": ""},
            ]
        })
        .to_string();

        let (status, json) = post_chat(app(provider.clone()), body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({"error": "Message text is required for all conversation parts."})
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_a_500_with_provider_message() {
        let provider = StubProvider::failing("quota exceeded");
        let body = json!({"conversation": [{"role": "user", "text": "Halo"}]}).to_string();

        let (status, json) = post_chat(app(provider), body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "quota exceeded"}));
    }

    #[tokio::test]
    async fn malformed_json_is_a_500_with_error_body() {
        let provider = StubProvider::answering("unused");

        let (status, json) = post_chat(app(provider.clone()), "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
        assert!(provider.calls().is_empty());
    }
}
