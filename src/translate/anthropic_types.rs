//! Type definitions for the Anthropic Messages API.
//!
//! The request side is what we send TO the upstream (built from a translated
//! chat-completion request), the response side is what the upstream sends
//! back. Optional request fields use `skip_serializing_if` throughout: the
//! upstream must never receive an explicit `null`.

use serde::{Deserialize, Serialize};

use super::openai_types::ChatMessage;

// ---------------------------------------------------------------------------
// Request types (what we send TO the upstream)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    // Required by the Messages API, so always populated (default applied
    // during translation when the caller omitted it).
    pub max_tokens: u64,
    // Copied verbatim from the inbound request.
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Response types (what the upstream sends BACK to us)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub content: Vec<ResponseContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}
