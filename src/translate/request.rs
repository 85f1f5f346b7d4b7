//! Translate OpenAI Chat Completions requests into Anthropic Messages API requests.
//!
//! Messages pass through verbatim; the interesting work is parameter mapping:
//! `max_tokens` gets the default the Messages API requires, `stop` (string or
//! array) is normalized into `stop_sequences`, and sampling parameters are
//! copied only when the caller actually supplied them. Presence is tracked
//! with `Option`, never truthiness, so `temperature: 0.0` survives intact.

use super::anthropic_types::MessagesRequest;
use super::openai_types::ChatCompletionRequest;

/// The Messages API requires `max_tokens`; this is what we send when the
/// caller omitted it.
pub const DEFAULT_MAX_TOKENS: u64 = 1000;

/// Translate an OpenAI chat-completion request into an Anthropic Messages
/// request. Pure function, no I/O.
pub fn openai_to_anthropic(req: &ChatCompletionRequest) -> MessagesRequest {
    MessagesRequest {
        model: req.model.clone(),
        max_tokens: req.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        messages: req.messages.clone(),
        temperature: req.temperature,
        top_p: req.top_p,
        stop_sequences: req.stop.as_ref().map(|s| s.to_sequences()),
    }
}
