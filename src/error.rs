//! Error types for the response cache
//!
//! Cache operations themselves are total and never fail. Errors only come
//! from the layers around the cache: configuration loading and the loader
//! a session calls on a miss.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// An environment variable was set but could not be parsed
    #[error("Invalid configuration: {var}={value:?}")]
    InvalidConfig { var: String, value: String },

    /// The loader invoked on a cache miss failed
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
