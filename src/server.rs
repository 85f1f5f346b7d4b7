use crate::auth;
use crate::catalog;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::logging::SharedLogger;
use crate::translate;
use crate::upstream::{self, UpstreamOutcome};
use crate::validate;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// The CORS header set attached to every response, success or error, so that
// browser callers can always read the body. One place owns these values.
const CORS_ALLOW_ORIGIN: &str = "*";
const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization, x-api-key, anthropic-version";
const CORS_MAX_AGE: &str = "86400";

#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub client: reqwest::Client,
    pub logger: SharedLogger,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_status))
        .route("/v1/messages", any(handle_native_messages))
        .route("/v1/models", get(handle_models))
        .route("/v1/chat/completions", any(handle_chat_completions))
        .fallback(handle_unmatched)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Preflight requests terminate here without touching the router; everything
/// else passes through and gets the CORS set stamped onto the response.
async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut res = StatusCode::OK.into_response();
        apply_cors_headers(res.headers_mut());
        res.headers_mut().insert(
            "access-control-max-age",
            HeaderValue::from_static(CORS_MAX_AGE),
        );
        return res;
    }

    let mut res = next.run(req).await;
    apply_cors_headers(res.headers_mut());
    res
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
}

async fn handle_status() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "endpoints": [
            "POST /v1/chat/completions",
            "POST /v1/messages",
            "GET /v1/models",
        ],
    }))
}

async fn handle_models() -> Json<catalog::ModelList> {
    Json(catalog::model_list())
}

/// The translated endpoint: validate, translate credentials, map the request,
/// make the one upstream call, map the response back.
async fn handle_chat_completions(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        return GatewayError::MethodNotAllowed.into_response();
    }

    // Validation and auth resolve before any upstream call is attempted.
    let req = match validate::parse_chat_request(&body) {
        Ok(r) => r,
        Err(e) => {
            state.logger.warn("server", format!("Rejected request: {}", e));
            return e.into_response();
        }
    };

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let creds = match auth::translate_bearer(auth_header) {
        Ok(c) => c,
        Err(e) => {
            state.logger.warn("server", "Rejected request: bad credentials");
            return e.into_response();
        }
    };

    state.logger.info(
        "server",
        format!("Translated request: model={} messages={}", req.model, req.messages.len()),
    );

    let upstream_req = translate::request::openai_to_anthropic(&req);

    match upstream::send_messages(
        &upstream_req,
        &creds,
        &state.config,
        &state.client,
        &state.logger,
    )
    .await
    {
        Ok(UpstreamOutcome::Completed(resp)) => {
            match translate::response::anthropic_to_openai(&resp, &req.model) {
                Ok(out) => Json(out).into_response(),
                Err(e) => {
                    state.logger.error("server", format!("Mapping fault: {}", e));
                    e.into_response()
                }
            }
        }
        Ok(UpstreamOutcome::Error { status, body }) => verbatim_response(status, body),
        Err(e) => {
            state.logger.error("server", format!("Upstream call failed: {}", e));
            e.into_response()
        }
    }
}

/// Native Messages passthrough: no translation, caller headers and body are
/// forwarded unmodified and the upstream's answer comes back verbatim.
async fn handle_native_messages(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        return GatewayError::MethodNotAllowed.into_response();
    }

    let req_headers = reqwest_headers_from_axum(&headers);

    match upstream::forward_native(body, &req_headers, &state.config, &state.client, &state.logger)
        .await
    {
        Ok((status, resp_headers, resp_body)) => {
            passthrough_response(status, &resp_headers, resp_body)
        }
        Err(e) => {
            state.logger.error("server", format!("Passthrough failed: {}", e));
            e.into_response()
        }
    }
}

/// Unmatched paths get an explicit 404; nothing is implicitly forwarded to
/// an unvalidated destination.
async fn handle_unmatched(uri: Uri) -> Response {
    GatewayError::UnknownEndpoint {
        path: uri.path().to_string(),
    }
    .into_response()
}

/// Re-emit an upstream status and body unmodified. Used for upstream errors
/// on the translated endpoint, where the gateway's own outbound call always
/// yields an identity-encoded JSON body.
fn verbatim_response(status: u16, body: Bytes) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Re-emit an upstream status and body, keeping the upstream's own
/// representation headers so the caller can interpret the bytes.
fn passthrough_response(
    status: u16,
    upstream_headers: &reqwest::header::HeaderMap,
    body: Bytes,
) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);

    let content_type = upstream_headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type);

    if let Some(encoding) = upstream_headers
        .get(reqwest::header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
    {
        builder = builder.header(header::CONTENT_ENCODING, encoding);
    }

    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn reqwest_headers_from_axum(headers: &HeaderMap) -> reqwest::header::HeaderMap {
    let mut out = reqwest::header::HeaderMap::new();
    for (key, value) in headers.iter() {
        if let Ok(name) = reqwest::header::HeaderName::from_bytes(key.as_str().as_bytes()) {
            if let Ok(val) = reqwest::header::HeaderValue::from_bytes(value.as_bytes()) {
                out.insert(name, val);
            }
        }
    }
    out
}
