//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Request spans come from tower-http's TraceLayer, built by
//! `http::request::make_request_span`, which records the request ID on the
//! span; events emitted inside it inherit the field.
//! ```

pub mod logging;

pub use logging::{build_filter, init_logging};
