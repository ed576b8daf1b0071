//! # wirecall-protocol
//!
//! Wire protocol implementation for wirecall.
//!
//! This crate provides:
//! - The fixed 16-byte little-endian frame header codec
//! - Payload checksums (low 32 bits of xxHash64)
//! - CRC32-based service/method dispatch IDs
//! - Async frame reading/writing over any byte stream

pub mod checksum;
pub mod dispatch;
pub mod error;
pub mod framer;
pub mod header;

pub use checksum::payload_checksum;
pub use dispatch::{dispatch_id, method_id, service_id};
pub use error::ProtocolError;
pub use framer::{read_frame, read_header, read_payload, write_frame};
pub use header::{Header, HEADER_SIZE};

/// Default port for wirecall servers.
pub const DEFAULT_PORT: u16 = 7411;

/// Response `meta` value for a successful dispatch.
pub const STATUS_OK: u32 = 200;

/// Maximum frame payload size (16 MiB).
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;
