//! Response Cache demo
//!
//! Drives a cache session the way a request layer would: concurrent lookups
//! against a simulated transport, a bulk clear, and a final dump.

use std::time::Duration;

use anyhow::Context;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use response_cache::{CacheSession, Config, RequestDescriptor, TTL_NEVER_CLEAR};

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the session that owns the cache
/// 4. Issue concurrent requests, twice, so the second round hits the cache
/// 5. Clear the cache and show which entries survived
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "response_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting response cache demo");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: verbose={}, default_ttl={}",
        config.verbose, config.default_ttl
    );

    let session: CacheSession<Value> = CacheSession::new(config);
    session.cache().set_cleared_listener(|| info!("Cache cleared"));

    let mut requests: Vec<RequestDescriptor> = (1..=4)
        .map(|id| session.descriptor("json", format!("https://api.example.com/items/{id}")))
        .collect();
    requests.push(
        RequestDescriptor::new("json", "https://api.example.com/settings")
            .with_ttl(TTL_NEVER_CLEAR),
    );

    for round in 1..=2 {
        let mut handles = Vec::with_capacity(requests.len());
        for request in requests.clone() {
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                session
                    .fetch(&request, || simulated_transport(request.url().to_string()))
                    .await
            }));
        }
        for handle in handles {
            handle.await.context("request task panicked")??;
        }
        info!("Round {} done: {:?}", round, session.cache().stats());
    }

    session.cache().clear_all();
    session.cache().log_contents();
    info!("Final stats: {}", serde_json::to_string(&session.cache().stats())?);

    Ok(())
}

/// Stands in for the network: a short delay, then a canned body.
async fn simulated_transport(url: String) -> Result<Value, String> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(json!({ "url": url, "fetched": true }))
}
