//! Client error types.

use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] wirecall_protocol::ProtocolError),
}

impl ClientError {
    /// Returns whether the server closed the connection between frames.
    ///
    /// There is no retry at this layer; a caller that wants one must
    /// reconnect and resend.
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, ClientError::Protocol(p) if p.is_clean_close())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirecall_protocol::ProtocolError;

    #[test]
    fn test_connection_closed_detection() {
        let err = ClientError::Protocol(ProtocolError::ConnectionClosed);
        assert!(err.is_connection_closed());

        let err = ClientError::Protocol(ProtocolError::IncompleteHeader { got: 2 });
        assert!(!err.is_connection_closed());
    }
}
