//! The RPC proxy handler.
//!
//! # Per-request flow
//! ```text
//! method gate (GET → banner, POST → continue, else -32601)
//!     → buffer inbound body
//!     → parse as JSON object, recover `id`
//!     → balancer.pick()
//!     → POST original bytes upstream
//!     → buffer upstream body
//!     → relay status + body
//! ```
//!
//! Any failure short-circuits into a [`ProxyError`] which renders as a
//! JSON-RPC error. Nothing is retried.

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method},
    response::{IntoResponse, Response},
};
use std::error::Error as _;

use crate::http::error::ProxyError;
use crate::http::request::{request_id, X_REQUEST_ID};
use crate::http::response;
use crate::http::server::AppState;
use crate::jsonrpc;

/// Entry point for every path and method.
pub async fn rpc_handler(State(state): State<AppState>, request: Request) -> Response {
    let request_id = request_id(request.headers()).to_owned();

    match proxy(&state, &request_id, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                code = err.code(),
                id = %err.id(),
                endpoint = err.endpoint().unwrap_or("-"),
                timeout = err.is_timeout(),
                cause = %err.source().map(ToString::to_string).unwrap_or_default(),
                "{}",
                err
            );
            err.into_response()
        }
    }
}

async fn proxy(
    state: &AppState,
    request_id: &str,
    request: Request,
) -> Result<Response, ProxyError> {
    let method = request.method().clone();
    if method == Method::GET {
        return Ok(response::banner());
    }
    if method != Method::POST {
        return Err(ProxyError::MethodNotAllowed(method));
    }

    let (parts, body) = request.into_parts();
    let body: Bytes = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(ProxyError::ReadBody)?;

    let id = jsonrpc::extract_id(&body).map_err(ProxyError::InvalidJson)?;

    let endpoint = state.balancer.pick();
    tracing::debug!(
        request_id = %request_id,
        endpoint = %endpoint,
        bytes = body.len(),
        "Proxying request"
    );

    let outbound = state
        .client
        .post(endpoint.url().clone())
        .headers(outbound_headers(&parts.headers, &state.forward_headers, request_id))
        .body(body)
        .build()
        .map_err(|source| ProxyError::BuildRequest { id: id.clone(), source })?;

    let upstream = state
        .client
        .execute(outbound)
        .await
        .map_err(|source| ProxyError::Upstream {
            id: id.clone(),
            endpoint: endpoint.to_string(),
            source,
        })?;

    let status = upstream.status();
    let payload = upstream.bytes().await.map_err(|source| ProxyError::ReadResponse {
        id,
        endpoint: endpoint.to_string(),
        source,
    })?;

    tracing::debug!(
        request_id = %request_id,
        endpoint = %endpoint,
        status = status.as_u16(),
        bytes = payload.len(),
        "Upstream responded"
    );

    Ok(response::relay(status, payload))
}

/// Headers for the upstream request: the fixed content type, the request
/// id (generated, or the client's own `x-request-id` when it sent one), and
/// whatever inbound headers are explicitly allow-listed.
fn outbound_headers(inbound: &HeaderMap, allowed: &[HeaderName], request_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for name in allowed {
        for value in inbound.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(value) = HeaderValue::from_str(request_id) {
        headers.insert(X_REQUEST_ID, value);
    }
    headers
}
