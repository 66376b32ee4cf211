//! Provider-facing configuration: credentials, the validated client configuration, and the
//! endpoint set derived from the provider base URL.
//!
//! Everything here is validated once, at construction, and never mutated afterwards.

/// Credentials and the validated client configuration.
pub mod config;
/// Endpoint set derived from the provider base URL.
pub mod endpoints;

pub use config::*;
pub use endpoints::*;
