//! Proxy failures and their JSON-RPC representation.
//!
//! Every failure is terminal for its request: it is converted into a
//! JSON-RPC error envelope with HTTP 400 and returned to the caller. The
//! `Display` text of each variant is the exact message sent on the wire;
//! the underlying cause is kept as the error source for logging only.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

use crate::http::response;
use crate::jsonrpc::{ErrorResponse, INTERNAL_ERROR, METHOD_NOT_ALLOWED};

static NULL_ID: Value = Value::Null;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Inbound HTTP method other than GET or POST.
    #[error("Method not allowed")]
    MethodNotAllowed(Method),

    #[error("Error reading request body")]
    ReadBody(#[source] axum::Error),

    #[error("Invalid JSON request body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Error creating proxy request")]
    BuildRequest {
        id: Value,
        #[source]
        source: reqwest::Error,
    },

    /// Connection, TLS or timeout failure talking to the upstream.
    #[error("Error making request to RPC")]
    Upstream {
        id: Value,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error reading RPC response")]
    ReadResponse {
        id: Value,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ProxyError {
    /// JSON-RPC error code reported to the caller.
    pub fn code(&self) -> i32 {
        match self {
            ProxyError::MethodNotAllowed(_) => METHOD_NOT_ALLOWED,
            _ => INTERNAL_ERROR,
        }
    }

    /// Request id to echo back. Null until the body has been parsed.
    pub fn id(&self) -> &Value {
        match self {
            ProxyError::BuildRequest { id, .. }
            | ProxyError::Upstream { id, .. }
            | ProxyError::ReadResponse { id, .. } => id,
            _ => &NULL_ID,
        }
    }

    /// Upstream involved in the failure, if one had been selected.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ProxyError::Upstream { endpoint, .. } | ProxyError::ReadResponse { endpoint, .. } => {
                Some(endpoint)
            }
            _ => None,
        }
    }

    /// True when the upstream call was cut off by the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            ProxyError::Upstream { source, .. } | ProxyError::ReadResponse { source, .. } => {
                source.is_timeout()
            }
            _ => false,
        }
    }

    pub fn to_json_rpc(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string(), self.id().clone())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = self.to_json_rpc();
        response::stamp((StatusCode::BAD_REQUEST, Json(body)).into_response())
    }
}
