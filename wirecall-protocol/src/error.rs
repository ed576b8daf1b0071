//! Protocol error types.

use thiserror::Error;

/// Protocol-level errors that can occur while framing or deframing.
///
/// All of these are connection-fatal: a stream that produced one is
/// mid-frame and cannot be resynchronized, so the owner must close it.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("incomplete header: got {got} of 16 bytes")]
    IncompleteHeader { got: usize },

    #[error("connection closed")]
    ConnectionClosed,

    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: u32, max: u32 },

    #[error("checksum mismatch: expected {expected:#x}, got {actual:#x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    /// Returns whether this error is a clean end-of-stream (the peer
    /// closed between frames, not in the middle of one).
    pub fn is_clean_close(&self) -> bool {
        matches!(self, ProtocolError::ConnectionClosed)
    }
}
