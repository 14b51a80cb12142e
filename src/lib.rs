//! Response Cache - A thread-safe in-process cache for request responses
//!
//! Caches responses keyed by request identity, with per-request TTL, entries
//! that survive bulk clears, and a listener notified after each clear.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use cache::{CacheKey, ResponseCache, Ttl, TTL_NEVER, TTL_NEVER_CLEAR};
pub use config::Config;
pub use error::{CacheError, Result};
pub use models::RequestDescriptor;
pub use session::CacheSession;
