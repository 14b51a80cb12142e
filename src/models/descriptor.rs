//! Request descriptor handed to the cache by the request layer
//!
//! Carries the four request-identity fields the cache key is built from,
//! plus the TTL policy that governs the cached response.

use serde::{Deserialize, Serialize};

use crate::cache::Ttl;

/// Identity of an outgoing request, as seen by the cache.
///
/// # Fields
/// - `data_type`: expected response data type (e.g. `json`, `text`)
/// - `method`: HTTP method, `GET` when unset
/// - `url`: request URL; an unset URL still yields a (degenerate) key
/// - `body`: stringified request body, empty when unset
/// - `ttl`: cache policy for the response, `Ttl::Never` when unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default = "default_ttl")]
    pub ttl: Ttl,
}

fn default_ttl() -> Ttl {
    Ttl::Never
}

impl RequestDescriptor {
    /// Creates a `GET` descriptor without a body, cached until the next clear.
    pub fn new(data_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            method: None,
            url: Some(url.into()),
            body: None,
            ttl: default_ttl(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Uses the compact JSON rendering of `body` as the body component.
    pub fn with_json_body(mut self, body: &serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn with_ttl(mut self, ttl: impl Into<Ttl>) -> Self {
        self.ttl = ttl.into();
        self
    }

    /// HTTP method, falling back to `GET`.
    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    /// URL, or the empty string when unset.
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Body component, or the empty string when unset.
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}
