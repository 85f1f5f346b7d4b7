//! Error taxonomy for the gateway.
//!
//! Every failure that can surface to a caller maps to an HTTP status and a
//! JSON envelope of the shape `{"error": {"message": ..., "details": ...}}`.
//! Validation and auth failures are resolved before any upstream call is made.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid JSON in request body")]
    InvalidJson { detail: String },

    #[error("Missing or empty required field: model")]
    MissingModel,

    #[error("Missing required field: messages (must be an array)")]
    MissingMessages,

    #[error("Missing or invalid Authorization header (expected: Bearer <token>)")]
    InvalidAuth,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unknown endpoint: {path}")]
    UnknownEndpoint { path: String },

    #[error("Failed to reach upstream API")]
    UpstreamConnect { detail: String },

    #[error("Upstream response contained no content blocks")]
    EmptyContent,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// The HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson { .. } | Self::MissingModel | Self::MissingMessages => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidAuth => StatusCode::UNAUTHORIZED,
            Self::UnknownEndpoint { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UpstreamConnect { .. } | Self::EmptyContent => StatusCode::BAD_GATEWAY,
            Self::Config { .. } | Self::Io(_) | Self::Toml(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The wire envelope for this error.
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            Self::InvalidJson { detail } => {
                ErrorEnvelope::with_details(self.to_string(), detail.clone())
            }
            Self::UpstreamConnect { detail } => {
                ErrorEnvelope::with_details(self.to_string(), detail.clone())
            }
            Self::Config { .. } | Self::Io(_) | Self::Toml(_) | Self::Other(_) => {
                ErrorEnvelope::with_details("Internal gateway error", self.to_string())
            }
            _ => ErrorEnvelope::new(self.to_string()),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}

/// JSON error body returned to callers: `{"error": {"message", "details"?}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                details: Some(details.into()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
