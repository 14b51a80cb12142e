//! Cache Store Module
//!
//! The response cache: live entries keyed by request identity, a retained set
//! that survives bulk clears, and a single listener notified after each clear.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::stats::StatCounters;
use crate::cache::{CacheEntry, CacheKey, CacheStats, Clock, SystemClock};
use crate::config::Config;
use crate::models::RequestDescriptor;

/// Callback invoked after `clear_all` has repopulated the cache.
pub type ClearedListener = Arc<dyn Fn() + Send + Sync>;

// == Response Cache ==
/// Thread-safe response cache with per-request TTL.
///
/// Lock order for operations touching more than one map is
/// `live -> retained`. The listener slot is never held while a map lock is.
pub struct ResponseCache<V = serde_json::Value> {
    /// Live entries, value and timestamp stored together
    live: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Entries written with `Ttl::NeverClear`, re-seeded on every clear
    retained: RwLock<HashMap<String, Arc<V>>>,
    listener: RwLock<Option<ClearedListener>>,
    clock: Arc<dyn Clock>,
    verbose: AtomicBool,
    stats: StatCounters,
}

impl<V: fmt::Debug> ResponseCache<V> {
    // == Constructor ==
    /// Creates an empty cache reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache reading the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            live: RwLock::new(HashMap::new()),
            retained: RwLock::new(HashMap::new()),
            listener: RwLock::new(None),
            clock,
            verbose: AtomicBool::new(false),
            stats: StatCounters::default(),
        }
    }

    /// Creates an empty cache with settings taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        let cache = Self::new();
        cache.set_verbose(config.verbose);
        cache
    }

    // == Verbose ==
    /// Enables or disables per-operation diagnostic logging.
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    // == Get ==
    /// Returns the cached response for `request` if it is still fresh.
    ///
    /// A response that is stale under `request.ttl` is evicted and `None` is
    /// returned. Absence is never an error.
    pub fn get(&self, request: &RequestDescriptor) -> Option<Arc<V>> {
        let key = CacheKey::for_request(request);
        let now = self.clock.now();
        let entry = read(&self.live).get(key.as_str()).cloned();

        if self.is_verbose() {
            info!(
                key = %key,
                response = ?entry.as_ref().map(|e| &e.value),
                stored_at = ?entry.as_ref().map(|e| e.stored_at),
                "Cache lookup"
            );
        }

        let Some(entry) = entry else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_valid(request.ttl, now) {
            if self.is_verbose() {
                info!(key = %key, "Returning cached response");
            }
            self.stats.record_hit();
            return Some(entry.value);
        }

        // Re-check under the write lock so a concurrent fresh put survives.
        let evicted = {
            let mut live = write(&self.live);
            let stale = live
                .get(key.as_str())
                .is_some_and(|current| !current.is_valid(request.ttl, now));
            if stale {
                live.remove(key.as_str());
            }
            stale
        };

        if evicted {
            self.stats.record_expiration();
            debug!(key = %key, ttl = %request.ttl, "Evicted stale response");
        }
        if self.is_verbose() {
            info!(key = %key, "Returning nothing, cache out of date");
        }
        self.stats.record_miss();
        None
    }

    // == Put ==
    /// Caches `response` for `request` and returns the key it was stored under.
    ///
    /// With `Ttl::NeverClear` the response is also added to the retained set.
    pub fn put(&self, response: impl Into<Arc<V>>, request: &RequestDescriptor) -> CacheKey {
        let key = CacheKey::for_request(request);
        let value = response.into();
        let now = self.clock.now();

        if self.is_verbose() {
            info!(key = %key, response = ?value, "Cache write");
        }

        write(&self.live).insert(key.to_string(), CacheEntry::new(Arc::clone(&value), now));

        if request.ttl.survives_clear() {
            write(&self.retained).insert(key.to_string(), value);
        }

        key
    }

    // == Remove ==
    /// Removes `key` from the live entries and the retained set.
    pub fn remove_key(&self, key: &str) {
        write(&self.live).remove(key);
        write(&self.retained).remove(key);
    }

    /// Removes the entry addressed by `dataType::method::url`.
    ///
    /// The body is not part of this key, so it does not match keys written by
    /// `put`. Use `remove_key` with the key `put` returned for those.
    pub fn remove(&self, request: &RequestDescriptor) {
        let key = CacheKey::for_removal(request);
        self.remove_key(key.as_str());
    }

    // == Clear All ==
    /// Drops every live entry, then re-seeds the retained set.
    ///
    /// The listener runs afterwards on the calling thread with no cache lock
    /// held, so it may call back into the cache.
    pub fn clear_all(&self) {
        let restored = {
            let mut live = write(&self.live);
            live.clear();
            let retained = read(&self.retained);
            let now = self.clock.now();
            live.extend(
                retained
                    .iter()
                    .map(|(key, value)| (key.clone(), CacheEntry::new(Arc::clone(value), now))),
            );
            live.len()
        };

        self.stats.record_clear();
        debug!(restored, "Cache cleared");

        let listener = read(&self.listener).clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    // == Listener ==
    /// Registers the callback run after every `clear_all`, replacing any
    /// previous one.
    pub fn set_cleared_listener<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *write(&self.listener) = Some(Arc::new(listener));
    }

    pub fn clear_cleared_listener(&self) {
        *write(&self.listener) = None;
    }

    // == Inspection ==
    /// Returns a shallow copy of the live entries.
    pub fn snapshot(&self) -> HashMap<String, Arc<V>> {
        read(&self.live)
            .iter()
            .map(|(key, entry)| (key.clone(), Arc::clone(&entry.value)))
            .collect()
    }

    /// When the live entry for `key` was stored.
    pub fn stored_at(&self, key: &str) -> Option<DateTime<Utc>> {
        read(&self.live).get(key).map(|entry| entry.stored_at)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        read(&self.live).contains_key(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        read(&self.live).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.live).is_empty()
    }

    /// Number of entries that survive `clear_all`.
    pub fn retained_len(&self) -> usize {
        read(&self.retained).len()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len(), self.retained_len())
    }

    /// Logs every live entry.
    pub fn log_contents(&self) {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            info!("Cache is empty");
            return;
        }
        for (key, value) in &snapshot {
            info!("{} : {:?}", key, value);
        }
    }
}

impl<V: fmt::Debug> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ResponseCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &read(&self.live).len())
            .field("retained", &read(&self.retained).len())
            .field("verbose", &self.verbose.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

// Poisoned locks are recovered; cache operations never fail.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
