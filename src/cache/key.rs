//! Cache Key Module
//!
//! Deterministic keys derived from request identity.
//!
//! Lookups and writes use four fields `dataType::method::url::body`.
//! Descriptor-based removal uses three fields `dataType::method::url`, so it
//! never matches a key written by `put`; removing a specific response needs
//! the key string `put` returned.

use std::fmt;

use crate::models::RequestDescriptor;

/// Separator between key components.
pub const KEY_DELIMITER: &str = "::";

// == Cache Key ==
/// String key identifying one cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    // == Request Key ==
    /// Builds the four-field key used by `get` and `put`.
    pub fn for_request(request: &RequestDescriptor) -> Self {
        Self(
            [
                request.data_type.as_str(),
                request.method(),
                request.url(),
                request.body(),
            ]
            .join(KEY_DELIMITER),
        )
    }

    // == Removal Key ==
    /// Builds the three-field key used by descriptor-based removal.
    pub fn for_removal(request: &RequestDescriptor) -> Self {
        Self([request.data_type.as_str(), request.method(), request.url()].join(KEY_DELIMITER))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_key_format() {
        let req = RequestDescriptor::new("json", "https://api.example.com/items")
            .with_method("POST")
            .with_body("a=1");
        assert_eq!(
            CacheKey::for_request(&req).as_str(),
            "json::POST::https://api.example.com/items::a=1"
        );
    }

    #[test]
    fn test_request_key_defaults() {
        let req = RequestDescriptor::new("text", "/status");
        assert_eq!(CacheKey::for_request(&req).as_str(), "text::GET::/status::");
    }

    #[test]
    fn test_removal_key_has_no_body() {
        let req = RequestDescriptor::new("json", "/items").with_body("X");
        assert_eq!(CacheKey::for_removal(&req).as_str(), "json::GET::/items");
        assert_ne!(CacheKey::for_removal(&req), CacheKey::for_request(&req));
    }

    #[test]
    fn test_missing_url_is_degenerate_not_fatal() {
        let req: RequestDescriptor = serde_json::from_str(r#"{"dataType": "json"}"#).unwrap();
        assert_eq!(CacheKey::for_request(&req).as_str(), "json::GET::::");
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = RequestDescriptor::new("json", "/x").with_body("b").with_ttl(10);
        let b = RequestDescriptor::new("json", "/x").with_body("b").with_ttl(-1);
        assert_eq!(CacheKey::for_request(&a), CacheKey::for_request(&b));
    }
}
