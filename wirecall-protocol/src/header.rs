//! Fixed-size frame header codec.
//!
//! Every message on the wire is a 16-byte header followed immediately by
//! `size` bytes of payload. All multi-byte fields are little-endian:
//!
//! ```text
//! +-------------+----------+---------+--------+----------+--------+
//! | compression | bitflags | session |  size  | checksum |  meta  |
//! |   1 byte    |  1 byte  | 2 bytes | 4 bytes| 4 bytes  | 4 bytes|
//! +-------------+----------+---------+--------+----------+--------+
//! ```
//!
//! `meta` is overloaded: it carries the dispatch ID on a request and the
//! status code on a response.

use crate::checksum::payload_checksum;
use crate::error::ProtocolError;
use crate::MAX_PAYLOAD_SIZE;
use bytes::{BufMut, BytesMut};

/// Size of the frame header in bytes (1+1+2+4+4+4 = 16).
pub const HEADER_SIZE: usize = 16;

/// A decoded frame header.
///
/// Headers are never mutated after decode; responses get a freshly
/// encoded header rather than a patched request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Compression codec (reserved, always 0).
    pub compression: i8,
    /// Frame flags (reserved, always 0).
    pub bitflags: i8,
    /// Client-assigned correlation counter.
    pub session: u16,
    /// Payload length in bytes.
    pub size: u32,
    /// Checksum of the payload bytes (not the header).
    pub checksum: u32,
    /// Dispatch ID on a request, status code on a response.
    pub meta: u32,
}

impl Header {
    /// Encodes a header for the given payload.
    ///
    /// `size` and `checksum` are derived from the payload; the reserved
    /// compression and bitflags bytes are always 0.
    pub fn encode(session: u16, payload: &[u8], meta: u32) -> Result<BytesMut, ProtocolError> {
        let size = payload.len() as u32;
        if size > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::FrameTooLarge {
                size,
                max: MAX_PAYLOAD_SIZE,
            });
        }

        let mut buf = BytesMut::with_capacity(HEADER_SIZE);
        buf.put_i8(0); // compression
        buf.put_i8(0); // bitflags
        buf.put_u16_le(session);
        buf.put_u32_le(size);
        buf.put_u32_le(payload_checksum(payload));
        buf.put_u32_le(meta);
        Ok(buf)
    }

    /// Decodes a header from the first 16 bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<Self, ProtocolError> {
        if buf.len() < HEADER_SIZE {
            return Err(ProtocolError::IncompleteHeader { got: buf.len() });
        }

        let size = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        if size > MAX_PAYLOAD_SIZE {
            return Err(ProtocolError::FrameTooLarge {
                size,
                max: MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self {
            compression: buf[0] as i8,
            bitflags: buf[1] as i8,
            session: u16::from_le_bytes([buf[2], buf[3]]),
            size,
            checksum: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            meta: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
        })
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[ compression={}, bitflags={}, session={}, size={}, checksum={}, meta={} ]",
            self.compression, self.bitflags, self.session, self.size, self.checksum, self.meta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_header_roundtrip() {
        let payload = b"hello wirecall";
        let encoded = Header::encode(7, payload, 1792279101).unwrap();
        let header = Header::decode(&encoded).unwrap();

        assert_eq!(header.compression, 0);
        assert_eq!(header.bitflags, 0);
        assert_eq!(header.session, 7);
        assert_eq!(header.size, payload.len() as u32);
        assert_eq!(header.checksum, payload_checksum(payload));
        assert_eq!(header.meta, 1792279101);
    }

    #[test]
    fn test_encode_is_fixed_width() {
        assert_eq!(Header::encode(0, b"", 0).unwrap().len(), HEADER_SIZE);
        assert_eq!(Header::encode(1, b"x", 1).unwrap().len(), HEADER_SIZE);
        let big = vec![0u8; 64 * 1024];
        assert_eq!(Header::encode(2, &big, 2).unwrap().len(), HEADER_SIZE);
    }

    #[test]
    fn test_layout_is_little_endian() {
        let encoded = Header::encode(0x0102, b"", 0x0A0B0C0D).unwrap();
        assert_eq!(&encoded[2..4], &[0x02, 0x01]);
        // Empty payload: size is zero
        assert_eq!(&encoded[4..8], &[0, 0, 0, 0]);
        assert_eq!(&encoded[12..16], &[0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn test_decode_short_buffer() {
        let result = Header::decode(&[0u8; 10]);
        assert!(matches!(
            result,
            Err(ProtocolError::IncompleteHeader { got: 10 })
        ));
    }

    #[test]
    fn test_decode_oversized_frame() {
        let mut buf = [0u8; HEADER_SIZE];
        buf[4..8].copy_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_le_bytes());
        let result = Header::decode(&buf);
        assert!(matches!(result, Err(ProtocolError::FrameTooLarge { .. })));
    }

    #[test]
    fn test_encode_oversized_payload() {
        let huge = vec![0u8; (MAX_PAYLOAD_SIZE + 1) as usize];
        let result = Header::encode(0, &huge, 0);
        assert!(matches!(result, Err(ProtocolError::FrameTooLarge { .. })));
    }

    #[test]
    fn test_display() {
        let header = Header::decode(&Header::encode(3, b"ab", 200).unwrap()).unwrap();
        let s = header.to_string();
        assert!(s.contains("session=3"));
        assert!(s.contains("size=2"));
        assert!(s.contains("meta=200"));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(session: u16, meta: u32, payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = Header::encode(session, &payload, meta).unwrap();
            prop_assert_eq!(encoded.len(), HEADER_SIZE);

            let header = Header::decode(&encoded).unwrap();
            prop_assert_eq!(header.session, session);
            prop_assert_eq!(header.meta, meta);
            prop_assert_eq!(header.size, payload.len() as u32);
            prop_assert_eq!(header.checksum, payload_checksum(&payload));
        }
    }
}
