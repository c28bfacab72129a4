use gloo_net::http::Request;

use crate::errors::parse_error_message;
use crate::models::{ChatRequest, ChatResponse, ErrorBody};

/// Chat endpoint; the client is served from the same origin.
const CHAT_URL: &str = "/api/chat";

/// Sends the conversation and returns the generated text.
/// On failure returns a message suitable for display.
pub async fn send_chat(request: &ChatRequest) -> Result<String, String> {
    let resp = Request::post(CHAT_URL)
        .json(request)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        let fallback = format!("Server error: {}", resp.status());
        return Err(match resp.json::<ErrorBody>().await {
            Ok(ErrorBody { error: Some(raw) }) => parse_error_message(&raw),
            _ => fallback,
        });
    }

    resp.json::<ChatResponse>()
        .await
        .map(|r| r.result)
        .map_err(|e| format!("Parse error: {e}"))
}
