//! Cache Module
//!
//! Provides an in-process response cache with per-request TTL and entries
//! that survive bulk clears.

mod clock;
mod entry;
mod key;
mod stats;
mod store;
mod ttl;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{CacheKey, KEY_DELIMITER};
pub use stats::CacheStats;
pub use store::{ClearedListener, ResponseCache};
pub use ttl::{Ttl, TTL_NEVER, TTL_NEVER_CLEAR};
