//! Response construction for the client side.
//!
//! Every response on the RPC route carries the same fixed header set,
//! whether the body came from an upstream or was synthesized locally:
//! `Content-Type: application/json`, `Access-Control-Allow-Origin: *` and
//! the `X-Powered-By` marker. Upstream response headers are not copied.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::Response,
};

pub const X_POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");

/// Identity marker sent with every response.
pub const POWERED_BY: &str = concat!("rpc-pool/", env!("CARGO_PKG_VERSION"));

/// Plain-text body answered to GET probes.
pub const BANNER: &str = concat!("running rpc-pool v", env!("CARGO_PKG_VERSION"));

/// Add the CORS and identity headers to `response`.
pub fn stamp(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(X_POWERED_BY, HeaderValue::from_static(POWERED_BY));
    response
}

/// Relay an upstream status and body verbatim.
pub fn relay(status: StatusCode, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    stamp(response)
}

/// Identity banner for GET requests.
pub fn banner() -> Response {
    let mut response = Response::new(Body::from(BANNER));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    stamp(response)
}
