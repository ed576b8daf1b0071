//! # wirecall-server
//!
//! TCP server for wirecall.
//!
//! This crate provides:
//! - An accept loop that hands each connection to its own task
//! - A per-connection read/dispatch/respond loop
//! - An immutable service registry built once before serving
//! - The `Service` capability contract for generated service stubs

pub mod error;
pub mod registry;
pub mod server;
pub mod service;

pub use error::ServerError;
pub use registry::{Registry, RegistryBuilder};
pub use server::{Server, ServerConfig, ServerStats};
pub use service::{HandlerError, RawHandle, Service};
