//! JSON-RPC 2.0 wire types used by the proxy.
//!
//! The proxy never interprets `method` or `params`. It only needs to recover
//! the request `id` so that synthesized errors can be correlated, and to
//! produce error envelopes in the shape Ethereum-style clients expect:
//!
//! ```text
//! {"jsonrpc":"2.0","error":{"code":<int>,"message":<string>},"id":<id or null>}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol version stamped on every synthesized response.
pub const JSONRPC_VERSION: &str = "2.0";

/// Returned when the inbound HTTP method is not accepted.
pub const METHOD_NOT_ALLOWED: i32 = -32601;

/// Returned for every transport, parse and upstream failure.
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

/// JSON-RPC 2.0 error response.
///
/// Field order matters: serde emits struct fields in declaration order, which
/// keeps the serialized form byte-for-byte stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub jsonrpc: String,
    pub error: ErrorObject,
    pub id: Value,
}

impl ErrorResponse {
    pub fn new(code: i32, message: impl Into<String>, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            error: ErrorObject {
                code,
                message: message.into(),
            },
            id,
        }
    }
}

/// Extract the `id` member of a JSON-RPC request body.
///
/// The body must be a JSON object. A missing `id` (a notification) yields
/// `Value::Null`. The input bytes are only inspected, never rewritten.
pub fn extract_id(body: &[u8]) -> Result<Value, serde_json::Error> {
    let mut request: Map<String, Value> = serde_json::from_slice(body)?;
    Ok(request.remove("id").unwrap_or(Value::Null))
}
