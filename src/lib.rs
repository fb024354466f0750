//! JSON-RPC round-robin pool.
//!
//! A stateless HTTP proxy that spreads JSON-RPC requests across a fixed set
//! of upstream endpoints in strict round-robin order, forwarding request
//! bodies byte-for-byte and answering every failure with a JSON-RPC error.

pub mod config;
pub mod http;
pub mod jsonrpc;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;

pub use config::PoolConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use load_balancer::{LoadBalancer, RoundRobin};
