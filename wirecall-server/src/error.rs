//! Server error types.

use crate::service::HandlerError;
use thiserror::Error;

/// Server errors.
///
/// Everything a connection task can produce here is connection-fatal:
/// the task logs the error and closes its connection without sending a
/// response frame. No other connection or the accept loop is affected.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] wirecall_protocol::ProtocolError),

    #[error("unknown method: dispatch id {0} not registered")]
    UnknownMethod(u32),

    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),

    #[error("duplicate dispatch id {id}: {first} and {second} both route it")]
    DuplicateDispatchId {
        id: u32,
        first: String,
        second: String,
    },

    #[error("service {service} registered dispatch id {id} but resolves no handle for it")]
    MissingHandle { service: String, id: u32 },
}
