//! The service capability contract.
//!
//! Services are produced by an external schema/codegen collaborator; the
//! server only requires that each one can report its name and IDs and
//! resolve a dispatch ID to a raw byte-in/byte-out handler.

use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Opaque handler failure. Handler errors never produce a response
/// frame; they terminate the connection that carried the request.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by a raw method handle.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Bytes, HandlerError>> + Send>>;

/// A raw RPC method handle: request payload bytes in, response payload
/// bytes out. Payload structure is opaque to the protocol; both peers
/// agree on it out of band via matching dispatch IDs.
pub type RawHandle = Arc<dyn Fn(Bytes) -> HandlerFuture + Send + Sync>;

/// A routable RPC service.
pub trait Service: Send + Sync {
    /// Fully-qualified service name.
    fn service_name(&self) -> &str;

    /// The service's ID (`wirecall_protocol::service_id` of the name).
    fn service_id(&self) -> u32;

    /// Every dispatch ID this service routes. Enumerated once at
    /// registry-build time to construct the combined dispatch table.
    fn method_ids(&self) -> Vec<u32>;

    /// Resolves a dispatch ID to a method handle, or `None` if this
    /// service does not route it.
    fn method_handle(&self, dispatch_id: u32) -> Option<RawHandle>;
}

/// Wraps an async function as a [`RawHandle`].
pub fn raw_handle<F, Fut>(f: F) -> RawHandle
where
    F: Fn(Bytes) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Bytes, HandlerError>> + Send + 'static,
{
    Arc::new(move |payload| Box::pin(f(payload)))
}
