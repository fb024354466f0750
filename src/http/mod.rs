//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → handler.rs (method gate, body parse, pick endpoint, forward)
//!     → response.rs (relay or JSON-RPC error, fixed headers)
//!     → Send to client
//! ```

pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use error::ProxyError;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
