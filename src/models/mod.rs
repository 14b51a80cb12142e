//! Request models consumed by the cache
//!
//! The request layer describes each call with a `RequestDescriptor`; the
//! cache derives its keys and TTL policy from it.

pub mod descriptor;

pub use descriptor::RequestDescriptor;
