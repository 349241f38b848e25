//! Response bodies that have no domain type of their own.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Human-readable text for a failed response: the JSON `message` or `error`
/// field when present, else the raw body, else the status reason.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = map.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Success text from a body that may be JSON `{ "message": ... }`, plain text, or empty.
pub(crate) fn success_message(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<MessageResponse>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.trim().is_empty()) {
            return message;
        }
        return fallback.to_string();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
