//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Endpoint URLs must be absolute http(s) URLs
//! - Validate value ranges (timeouts > 0, port valid)
//! - Forwarded header names must be legal and not owned by the proxy
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PoolConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::HeaderName;
use thiserror::Error;
use crate::config::schema::PoolConfig;
use crate::load_balancer::{Endpoint, EndpointError};

/// Headers the proxy sets itself; forwarding them from the client would
/// corrupt framing or the fixed content type.
const RESERVED_HEADERS: &[&str] = &[
    "content-type",
    "content-length",
    "host",
    "transfer-encoding",
    "connection",
];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no RPC endpoints configured")]
    NoEndpoints,

    #[error("{0}")]
    Endpoint(#[from] EndpointError),

    #[error("listener port must be non-zero")]
    ZeroPort,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("invalid forward header name '{0}'")]
    InvalidHeaderName(String),

    #[error("header '{0}' is managed by the proxy and cannot be forwarded")]
    ReservedHeader(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &PoolConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }
    for address in &config.endpoints {
        if let Err(e) = Endpoint::parse(address) {
            errors.push(e.into());
        }
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.request_timeout_secs"));
    }

    for name in &config.upstream.forward_headers {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(header) if RESERVED_HEADERS.contains(&header.as_str()) => {
                errors.push(ValidationError::ReservedHeader(name.clone()));
            }
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::InvalidHeaderName(name.clone())),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
