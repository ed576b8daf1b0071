//! # wirecall-client
//!
//! Client library for wirecall.
//!
//! This crate provides:
//! - An async TCP client that exclusively owns its connection
//! - Per-connection session tracking for request correlation
//! - The synchronous send/receive call path for RPC requests

pub mod client;
pub mod error;

pub use client::Client;
pub use error::ClientError;
