use serde_json::Value;

/// Turns a raw server error into something fit for a toast.
///
/// Provider errors often arrive as a JSON-encoded body inside the `error`
/// string. When that is the case the inner `error.message` (or `message`) is
/// extracted and cut at the first line break. Anything else is returned as-is.
pub fn parse_error_message(raw: &str) -> String {
    if !raw.trim_start().starts_with('{') {
        return raw.to_string();
    }
    let Ok(inner) = serde_json::from_str::<Value>(raw.trim()) else {
        return raw.to_string();
    };

    let message = inner
        .pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .or_else(|| {
            inner
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
        })
        .unwrap_or(raw);

    message.lines().next().unwrap_or_default().to_string()
}
