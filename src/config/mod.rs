//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI / environment overrides (RPC_LIST, PORT, ...)
//!     → validation.rs (semantic checks)
//!     → PoolConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the endpoint pool never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    load_config, parse_endpoint_list, read_config, resolve_config, ConfigError, ConfigOverrides,
};
pub use schema::{ListenerConfig, ObservabilityConfig, PoolConfig, UpstreamConfig};
pub use validation::{validate_config, ValidationError};
