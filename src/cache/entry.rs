//! Cache Entry Module
//!
//! A live entry keeps its value and the instant it was stored together, so a
//! value can never be observed without its timestamp.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::Ttl;

// == Cache Entry ==
/// Represents a single cached response with its storage time.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored response, shared with readers
    pub value: Arc<V>,
    /// When the entry was stored
    pub stored_at: DateTime<Utc>,
}

// Manual impl: cloning shares the Arc and must not require `V: Clone`.
impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            stored_at: self.stored_at,
        }
    }
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: Arc<V>, stored_at: DateTime<Utc>) -> Self {
        Self { value, stored_at }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    ///
    /// Returns `Duration::ZERO` if `now` lies before `stored_at` (clock moved
    /// backwards), so such entries count as fresh.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    // == Is Valid ==
    /// Checks the entry against a read-time TTL policy.
    ///
    /// Boundary condition: an entry with `Ttl::Expires(d)` is valid only while
    /// `now < stored_at + d`, so it is stale at exactly `stored_at + d`.
    pub fn is_valid(&self, ttl: Ttl, now: DateTime<Utc>) -> bool {
        match ttl {
            Ttl::Expires(d) => self.age(now) < d,
            _ => ttl.is_unbounded(),
        }
    }
}
