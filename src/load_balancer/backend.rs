//! Upstream endpoint abstraction.

use std::fmt;
use thiserror::Error;
use url::Url;

/// Errors produced while turning a configured address into an [`Endpoint`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid endpoint URL '{address}': {reason}")]
    InvalidUrl { address: String, reason: String },

    #[error("unsupported scheme '{scheme}' for endpoint '{address}' (expected http or https)")]
    UnsupportedScheme { address: String, scheme: String },
}

/// A single upstream JSON-RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    /// Parse an absolute http(s) URL.
    pub fn parse(address: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(address).map_err(|e| EndpointError::InvalidUrl {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            other => Err(EndpointError::UnsupportedScheme {
                address: address.to_string(),
                scheme: other.to_string(),
            }),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
