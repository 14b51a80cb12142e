//! TTL Policy Module
//!
//! Per-request time-to-live policy, including the two sentinel policies that
//! never expire.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// == Public Constants ==
/// Raw TTL meaning "never expires until the next bulk clear".
pub const TTL_NEVER: i64 = -1;

/// Raw TTL meaning "never expires and survives every bulk clear".
pub const TTL_NEVER_CLEAR: i64 = -2;

// == Ttl ==
/// How long a cached response stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ttl {
    /// Valid until `clear_all` is called.
    Never,
    /// Valid forever; re-seeded into the cache after every `clear_all`.
    NeverClear,
    /// Valid while `now < stored_at + duration`.
    Expires(Duration),
}

impl Ttl {
    pub const NEVER: Ttl = Ttl::Never;
    pub const NEVER_CLEAR: Ttl = Ttl::NeverClear;

    // == From Millis ==
    /// Converts a raw millisecond TTL, honoring the two sentinels.
    ///
    /// Negative values other than the sentinels are stale on every read,
    /// so they map to a zero duration.
    pub fn from_millis(ms: i64) -> Self {
        match ms {
            TTL_NEVER => Ttl::Never,
            TTL_NEVER_CLEAR => Ttl::NeverClear,
            ms if ms < 0 => Ttl::Expires(Duration::ZERO),
            ms => Ttl::Expires(Duration::from_millis(ms as u64)),
        }
    }

    // == As Millis ==
    /// Returns the raw millisecond representation.
    pub fn as_millis(&self) -> i64 {
        match self {
            Ttl::Never => TTL_NEVER,
            Ttl::NeverClear => TTL_NEVER_CLEAR,
            Ttl::Expires(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        }
    }

    /// Returns true if entries read under this policy never go stale.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Ttl::Never | Ttl::NeverClear)
    }

    /// Returns true if entries written under this policy survive `clear_all`.
    pub fn survives_clear(&self) -> bool {
        matches!(self, Ttl::NeverClear)
    }
}

impl From<i64> for Ttl {
    fn from(ms: i64) -> Self {
        Ttl::from_millis(ms)
    }
}

impl From<Duration> for Ttl {
    fn from(d: Duration) -> Self {
        Ttl::Expires(d)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ttl::Never => write!(f, "never"),
            Ttl::NeverClear => write!(f, "never-clear"),
            Ttl::Expires(d) => write!(f, "{}ms", d.as_millis()),
        }
    }
}

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_millis())
    }
}

impl<'de> Deserialize<'de> for Ttl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Ttl::from_millis)
    }
}
