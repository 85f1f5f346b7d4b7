//! Credential translation between the two API conventions.
//!
//! Callers authenticate OpenAI-style (`Authorization: Bearer <token>`); the
//! upstream wants `x-api-key` plus a protocol version header. The version is
//! a gateway-owned constant, upgraded here and never taken from the caller.

use crate::error::{GatewayError, Result};

/// The Messages API protocol version the gateway speaks.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const BEARER_PREFIX: &str = "Bearer ";

/// Headers attached to every translated upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamCredentials {
    pub api_key: String,
    pub version: &'static str,
}

/// Extract the bearer token from an inbound `Authorization` header value and
/// produce the upstream credential pair. The prefix match is case-sensitive
/// and the remainder is taken as-is, with no trimming. Pure function, no I/O.
pub fn translate_bearer(header: Option<&str>) -> Result<UpstreamCredentials> {
    let value = header.ok_or(GatewayError::InvalidAuth)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .filter(|t| !t.is_empty())
        .ok_or(GatewayError::InvalidAuth)?;

    Ok(UpstreamCredentials {
        api_key: token.to_string(),
        version: ANTHROPIC_VERSION,
    })
}
