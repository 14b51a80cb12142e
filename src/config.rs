//! Configuration Module
//!
//! Handles loading cache settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::Ttl;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Log key, response and timestamp on every get/put
    pub verbose: bool,
    /// TTL stamped on descriptors created through a session
    pub default_ttl: Ttl,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_VERBOSE` - Verbose diagnostics (default: false)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds, `-1` / `-2`
    ///   for the sentinels (default: 300000)
    ///
    /// Unset variables fall back to defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            verbose: parse_var("CACHE_VERBOSE")?.unwrap_or(defaults.verbose),
            default_ttl: parse_var::<i64>("CACHE_DEFAULT_TTL_MS")?
                .map(Ttl::from_millis)
                .unwrap_or(defaults.default_ttl),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            default_ttl: Ttl::from_millis(300_000),
        }
    }
}

fn parse_var<T: FromStr>(var: &str) -> Result<Option<T>> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig {
                var: var.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.verbose);
        assert_eq!(config.default_ttl, Ttl::Expires(Duration::from_secs(300)));
    }

    // Env vars are process-global, so every env case lives in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_VERBOSE");
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        assert_eq!(Config::from_env().unwrap(), Config::default());

        env::set_var("CACHE_VERBOSE", "true");
        env::set_var("CACHE_DEFAULT_TTL_MS", "-2");
        let config = Config::from_env().unwrap();
        assert!(config.verbose);
        assert_eq!(config.default_ttl, Ttl::NeverClear);

        env::set_var("CACHE_DEFAULT_TTL_MS", "soon");
        let err = Config::from_env().unwrap_err();
        assert_eq!(
            err,
            CacheError::InvalidConfig {
                var: "CACHE_DEFAULT_TTL_MS".to_string(),
                value: "soon".to_string(),
            }
        );

        env::remove_var("CACHE_VERBOSE");
        env::remove_var("CACHE_DEFAULT_TTL_MS");
    }
}
