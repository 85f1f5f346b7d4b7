//! Structural validation of inbound chat-completion requests.
//!
//! Checks run in a fixed priority order and report the first violation:
//! unparseable JSON, then a missing/empty `model`, then a `messages` field
//! that is absent or not an array. Nothing deeper is validated here; message
//! roles and content shapes are forwarded as-is and the upstream is
//! authoritative on them.

use crate::error::{GatewayError, Result};
use crate::translate::openai_types::ChatCompletionRequest;

/// Parse and validate an inbound request body. Pure function, no I/O.
pub fn parse_chat_request(body: &[u8]) -> Result<ChatCompletionRequest> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| GatewayError::InvalidJson {
            detail: e.to_string(),
        })?;

    match value.get("model").and_then(serde_json::Value::as_str) {
        Some(model) if !model.is_empty() => {}
        _ => return Err(GatewayError::MissingModel),
    }

    if !value.get("messages").is_some_and(serde_json::Value::is_array) {
        return Err(GatewayError::MissingMessages);
    }

    // Shape mismatches past the two checked fields (e.g. a string max_tokens)
    // still count as a malformed body.
    serde_json::from_value(value).map_err(|e| GatewayError::InvalidJson {
        detail: e.to_string(),
    })
}
