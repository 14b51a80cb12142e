//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key derivation, TTL and clear behavior over
//! generated request identities.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheKey, ManualClock, ResponseCache, Ttl, TTL_NEVER, TTL_NEVER_CLEAR};
use crate::models::RequestDescriptor;

// == Strategies ==
fn data_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("json".to_string()), Just("text".to_string()), Just("xml".to_string())]
}

fn method_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("GET".to_string())),
        Just(Some("POST".to_string())),
        Just(Some("PUT".to_string())),
    ]
}

/// URL paths never contain "::", so distinct identities cannot collide.
fn url_strategy() -> impl Strategy<Value = String> {
    "/[a-z0-9]{1,12}(/[a-z0-9]{1,8}){0,3}".prop_map(|s| s)
}

fn body_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z0-9=&]{0,24}")
}

fn request_strategy() -> impl Strategy<Value = RequestDescriptor> {
    (data_type_strategy(), method_strategy(), url_strategy(), body_strategy()).prop_map(
        |(data_type, method, url, body)| RequestDescriptor {
            data_type,
            method,
            url: Some(url),
            body,
            ttl: Ttl::Never,
        },
    )
}

/// Operations applied to a cache and to a plain model map in lockstep
#[derive(Debug, Clone)]
enum CacheOp {
    Put { request: RequestDescriptor, value: u32, retained: bool },
    Get { request: RequestDescriptor },
    RemoveKey { request: RequestDescriptor },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (request_strategy(), any::<u32>(), any::<bool>())
            .prop_map(|(request, value, retained)| CacheOp::Put { request, value, retained }),
        request_strategy().prop_map(|request| CacheOp::Get { request }),
        request_strategy().prop_map(|request| CacheOp::RemoveKey { request }),
        Just(CacheOp::Clear),
    ]
}

fn new_cache() -> (ResponseCache<u32>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    (ResponseCache::with_clock(clock.clone()), clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Identical identity fields produce identical keys, whatever the TTL.
    #[test]
    fn prop_key_determinism(request in request_strategy(), ttl in -2i64..10_000) {
        let other = request.clone().with_ttl(ttl);
        prop_assert_eq!(CacheKey::for_request(&request), CacheKey::for_request(&other));

        let (cache, _) = new_cache();
        cache.put(7u32, &request);
        let got = cache.get(&other.with_ttl(TTL_NEVER));
        prop_assert_eq!(got.as_deref(), Some(&7));
    }

    // The key always has exactly four "::"-separated components in fixed order.
    #[test]
    fn prop_key_layout(request in request_strategy()) {
        let key = CacheKey::for_request(&request);
        let parts: Vec<&str> = key.as_str().splitn(4, "::").collect();
        prop_assert_eq!(parts.len(), 4);
        prop_assert_eq!(parts[0], request.data_type.as_str());
        prop_assert_eq!(parts[1], request.method());
        prop_assert_eq!(parts[2], request.url());
        prop_assert_eq!(parts[3], request.body());
    }

    // Fresh within the TTL, gone once it has elapsed.
    #[test]
    fn prop_ttl_boundary(request in request_strategy(), ttl in 1u64..100_000) {
        let (cache, clock) = new_cache();
        let request = request.with_ttl(ttl as i64);
        let key = cache.put(1u32, &request);

        clock.advance(Duration::from_millis(ttl - 1));
        prop_assert!(cache.get(&request).is_some());

        clock.advance(Duration::from_millis(2));
        prop_assert!(cache.get(&request).is_none());
        prop_assert!(!cache.contains_key(key.as_str()));
    }

    // A sequence of operations leaves the cache matching a simple model.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (cache, _) = new_cache();
        let mut live: HashMap<String, u32> = HashMap::new();
        let mut retained: HashMap<String, u32> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Put { request, value, retained: keep } => {
                    let ttl = if keep { TTL_NEVER_CLEAR } else { TTL_NEVER };
                    let key = cache.put(value, &request.with_ttl(ttl));
                    live.insert(key.to_string(), value);
                    if keep {
                        retained.insert(key.to_string(), value);
                    }
                }
                CacheOp::Get { request } => {
                    let key = CacheKey::for_request(&request).into_string();
                    let got = cache.get(&request).map(|v| *v);
                    prop_assert_eq!(got, live.get(&key).copied());
                }
                CacheOp::RemoveKey { request } => {
                    let key = CacheKey::for_request(&request).into_string();
                    cache.remove_key(&key);
                    live.remove(&key);
                    retained.remove(&key);
                }
                CacheOp::Clear => {
                    cache.clear_all();
                    live = retained.clone();
                }
            }
        }

        let snapshot: HashMap<String, u32> =
            cache.snapshot().into_iter().map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(snapshot, live);
        prop_assert_eq!(cache.retained_len(), retained.len());
    }

    // Only clear-surviving entries remain after a clear.
    #[test]
    fn prop_clear_keeps_only_retained(
        requests in prop::collection::vec((request_strategy(), any::<bool>()), 1..30)
    ) {
        let (cache, _) = new_cache();
        let mut expected: HashSet<String> = HashSet::new();

        // A later ordinary put does not take a key out of the retained set.
        for (request, keep) in &requests {
            let ttl = if *keep { TTL_NEVER_CLEAR } else { 5 };
            let key = cache.put(0u32, &request.clone().with_ttl(ttl)).into_string();
            if *keep {
                expected.insert(key);
            }
        }

        cache.clear_all();
        let keys: HashSet<String> = cache.snapshot().into_keys().collect();
        prop_assert_eq!(keys, expected);
    }
}
