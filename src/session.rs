//! Cache Session
//!
//! Owns the response cache for a client and hands it to collaborators. Use
//! one session per process in place of a global cache.
//!
//! # Example
//! ```ignore
//! let session: CacheSession = CacheSession::new(Config::from_env()?);
//! let request = session.descriptor("json", "https://api.example.com/items");
//! let items = session.fetch(&request, || transport.send(&request)).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::RequestDescriptor;

// == Cache Session ==
/// Composition root for the cache.
pub struct CacheSession<V = serde_json::Value> {
    cache: Arc<ResponseCache<V>>,
    config: Config,
}

impl<V: fmt::Debug> CacheSession<V> {
    /// Creates a session with a fresh cache configured from `config`.
    pub fn new(config: Config) -> Self {
        let cache = Arc::new(ResponseCache::from_config(&config));
        Self { cache, config }
    }

    /// Creates a session around an existing cache.
    pub fn with_cache(cache: Arc<ResponseCache<V>>, config: Config) -> Self {
        Self { cache, config }
    }

    /// Shared handle to the cache.
    pub fn cache(&self) -> Arc<ResponseCache<V>> {
        Arc::clone(&self.cache)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A `GET` descriptor carrying the configured default TTL.
    pub fn descriptor(&self, data_type: impl Into<String>, url: impl Into<String>) -> RequestDescriptor {
        RequestDescriptor::new(data_type, url).with_ttl(self.config.default_ttl)
    }

    // == Fetch ==
    /// Returns the cached response for `request`, or awaits `loader` and
    /// caches what it produces.
    ///
    /// The loader is not called on a hit. A failed load caches nothing.
    pub async fn fetch<F, Fut, E>(&self, request: &RequestDescriptor, loader: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        E: fmt::Display,
    {
        if let Some(cached) = self.cache.get(request) {
            debug!(url = request.url(), "Serving response from cache");
            return Ok(cached);
        }

        let value = loader().await.map_err(|e| {
            warn!(url = request.url(), error = %e, "Loader failed, nothing cached");
            CacheError::Fetch(e.to_string())
        })?;

        let value = Arc::new(value);
        let key = self.cache.put(Arc::clone(&value), request);
        debug!(key = %key, "Cached fetched response");
        Ok(value)
    }
}

impl<V> Clone for CacheSession<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            config: self.config.clone(),
        }
    }
}

impl<V> fmt::Debug for CacheSession<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSession")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}
