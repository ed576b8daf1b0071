//! Method dispatch identifiers.
//!
//! Routing keys are derived deterministically from fully-qualified
//! service and method names so that independent implementations agree on
//! them without negotiation:
//!
//! ```text
//! service_id  = crc32( service_name )
//! method_id   = crc32( method_name ":" request_type_fqn ":" response_type_fqn )
//! dispatch_id = service_id ^ method_id
//! ```
//!
//! The separator and field order are part of the wire contract; any
//! deviation produces a different ID and breaks cross-implementation
//! routing. A request frame carries the dispatch ID in its `meta` field.

/// Derives a service ID from a fully-qualified service name.
///
/// CRC32 (IEEE 802.3 polynomial) over the UTF-8 bytes of the name.
pub fn service_id(name: &str) -> u32 {
    crc32(name.as_bytes())
}

/// Derives a method ID from a method name and its request/response type
/// names, joined with `:` in that exact order.
pub fn method_id(method: &str, request_fqn: &str, response_fqn: &str) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(method.as_bytes());
    hasher.update(b":");
    hasher.update(request_fqn.as_bytes());
    hasher.update(b":");
    hasher.update(response_fqn.as_bytes());
    hasher.finalize()
}

/// Combines a service ID and a method ID into the routing key carried in
/// a request header's `meta` field.
pub fn dispatch_id(service_id: u32, method_id: u32) -> u32 {
    service_id ^ method_id
}

fn crc32(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
