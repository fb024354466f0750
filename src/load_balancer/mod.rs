//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Configured endpoint list (validated at startup)
//!     → backend.rs (parse into Endpoint)
//!     → round_robin.rs (immutable pool + atomic cursor)
//!     → pick() per inbound request
//! ```
//!
//! # Design Decisions
//! - The pool is immutable after construction; reads need no locking
//! - The cursor is the only shared mutable state (one atomic RMW per pick)
//! - Selectors are plain owned values, shared through `Arc`, never globals

pub mod backend;
pub mod round_robin;

pub use backend::{Endpoint, EndpointError};
pub use round_robin::{EmptyPoolError, RoundRobin, RoundRobinError};

/// A strategy that chooses the upstream endpoint for the next request.
pub trait LoadBalancer: Send + Sync + std::fmt::Debug {
    /// Choose the endpoint for one request.
    fn pick(&self) -> &Endpoint;

    /// All endpoints this balancer rotates through, in configured order.
    fn endpoints(&self) -> &[Endpoint];
}
