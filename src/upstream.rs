//! The single outbound call to the upstream Messages API, and its
//! classification into success / upstream error / connection failure.
//!
//! Exactly one outbound call per inbound request: no retries, no fan-out.
//! Upstream error bodies are propagated verbatim, never reshaped into the
//! caller's format.

use bytes::Bytes;

use crate::auth::UpstreamCredentials;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::logging::{LogLevel, SharedLogger};
use crate::translate::anthropic_types::{MessagesRequest, MessagesResponse};

/// Outcome of the translated upstream call.
pub enum UpstreamOutcome {
    /// 2xx with a well-formed body carrying at least one content block.
    Completed(MessagesResponse),
    /// Non-2xx status, or a 2xx body missing/lacking usable content. The
    /// upstream's status and body pass through to the caller unmodified.
    Error { status: u16, body: Bytes },
}

/// Issue the translated Messages call with the translated credentials.
///
/// # Errors
/// Returns `GatewayError::UpstreamConnect` when the call fails before any
/// HTTP response is received (DNS, refused connection, timeout).
pub async fn send_messages(
    req: &MessagesRequest,
    creds: &UpstreamCredentials,
    config: &GatewayConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> Result<UpstreamOutcome> {
    let url = config.messages_url();

    logger.info("upstream", format!("POST {} model={}", url, req.model));

    let response = client
        .post(&url)
        .header("x-api-key", &creds.api_key)
        .header("anthropic-version", creds.version)
        .header("Content-Type", "application/json")
        .json(req)
        .send()
        .await
        .map_err(|e| GatewayError::UpstreamConnect {
            detail: e.to_string(),
        })?;

    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|e| GatewayError::UpstreamConnect {
            detail: format!("Failed to read upstream response body: {}", e),
        })?;

    logger.log_with_context(
        LogLevel::Debug,
        "upstream",
        "Response received",
        serde_json::json!({ "status": status, "body_len": body.len() }),
    );

    if status >= 400 {
        logger.warn(
            "upstream",
            format!("Upstream error status={}", status),
        );
        return Ok(UpstreamOutcome::Error { status, body });
    }

    match serde_json::from_slice::<MessagesResponse>(&body) {
        Ok(parsed) if !parsed.content.is_empty() => {
            logger.info(
                "upstream",
                format!(
                    "Completed id={} in={} out={} tokens",
                    parsed.id.as_deref().unwrap_or("?"),
                    parsed.usage.input_tokens,
                    parsed.usage.output_tokens
                ),
            );
            Ok(UpstreamOutcome::Completed(parsed))
        }
        Ok(_) => {
            logger.warn("upstream", "Success status but empty content array");
            Ok(UpstreamOutcome::Error { status, body })
        }
        Err(e) => {
            logger.warn(
                "upstream",
                format!("Success status but unparseable body: {}", e),
            );
            Ok(UpstreamOutcome::Error { status, body })
        }
    }
}

/// Forward a native Messages request untouched: caller-supplied headers and
/// body go out as-is, the upstream's status, representation headers, and
/// body come back verbatim.
pub async fn forward_native(
    body: Bytes,
    headers: &reqwest::header::HeaderMap,
    config: &GatewayConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> Result<(u16, reqwest::header::HeaderMap, Bytes)> {
    let url = config.messages_url();

    logger.info("upstream", format!("Passthrough POST {}", url));

    let response = client
        .post(&url)
        .headers(strip_hop_headers(headers))
        .body(body)
        .send()
        .await
        .map_err(|e| GatewayError::UpstreamConnect {
            detail: e.to_string(),
        })?;

    let status = response.status().as_u16();
    let resp_headers = response.headers().clone();
    let resp_body = response
        .bytes()
        .await
        .map_err(|e| GatewayError::UpstreamConnect {
            detail: format!("Failed to read passthrough response: {}", e),
        })?;

    logger.info(
        "upstream",
        format!("Passthrough response status={} len={}", status, resp_body.len()),
    );

    Ok((status, resp_headers, resp_body))
}

/// Drop connection-scoped headers; reqwest computes its own host and length.
/// Accept-Encoding goes too: the gateway buffers the body and performs no
/// decompression, so it must not negotiate an encoding on the caller's behalf.
fn strip_hop_headers(headers: &reqwest::header::HeaderMap) -> reqwest::header::HeaderMap {
    let mut out = headers.clone();
    out.remove(reqwest::header::HOST);
    out.remove(reqwest::header::CONTENT_LENGTH);
    out.remove(reqwest::header::CONNECTION);
    out.remove(reqwest::header::ACCEPT_ENCODING);
    out
}
