//! Translate Anthropic Messages API responses into OpenAI chat-completion responses.

use chrono::Utc;
use uuid::Uuid;

use super::anthropic_types::MessagesResponse;
use super::openai_types::{ChatCompletionResponse, ChatUsage, Choice, ChoiceMessage};
use crate::error::{GatewayError, Result};

/// Translate an upstream Messages response into an OpenAI chat-completion
/// response. Pure apart from the synthetic `id` and `created` stamp.
/// `original_model` is echoed back so callers see the model they asked for.
///
/// # Errors
/// Returns `GatewayError::EmptyContent` when the upstream content array is
/// empty; the caller decides how to surface that.
pub fn anthropic_to_openai(
    resp: &MessagesResponse,
    original_model: &str,
) -> Result<ChatCompletionResponse> {
    let first = resp.content.first().ok_or(GatewayError::EmptyContent)?;

    let finish_reason = match resp.stop_reason.as_deref() {
        Some("end_turn") | None => "stop".to_string(),
        Some(other) => other.to_string(),
    };

    let prompt_tokens = resp.usage.input_tokens;
    let completion_tokens = resp.usage.output_tokens;

    Ok(ChatCompletionResponse {
        id: synthetic_id(),
        object: "chat.completion".to_string(),
        created: epoch_seconds(),
        model: original_model.to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".to_string(),
                content: first.text.clone(),
            },
            finish_reason,
        }],
        usage: ChatUsage {
            prompt_tokens,
            completion_tokens,
            // Always computed, never trusted from upstream.
            total_tokens: prompt_tokens + completion_tokens,
        },
    })
}

/// Unique within the process lifetime; cross-process uniqueness not required.
fn synthetic_id() -> String {
    format!("chatcmpl-{}", Uuid::new_v4().simple())
}

fn epoch_seconds() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}
