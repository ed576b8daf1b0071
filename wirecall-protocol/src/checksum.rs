//! Payload integrity checksum.

use xxhash_rust::xxh64::xxh64;

/// Computes the integrity checksum of a payload: the low 32 bits of the
/// 64-bit xxHash of the payload bytes, seed 0.
///
/// This is corruption detection, not authentication; every compatible
/// implementation must produce the same value for the same bytes.
pub fn payload_checksum(payload: &[u8]) -> u32 {
    xxh64(payload, 0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = payload_checksum(b"some payload bytes");
        let b = payload_checksum(b"some payload bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_payloads_differ() {
        assert_ne!(payload_checksum(b"payload-a"), payload_checksum(b"payload-b"));
        // Order-sensitive
        assert_ne!(payload_checksum(b"ab"), payload_checksum(b"ba"));
    }

    #[test]
    fn test_known_value() {
        // xxh64("", 0) = 0xef46db3751d8e999; the wire checksum is the low half.
        assert_eq!(payload_checksum(b""), 0x51d8e999);
    }
}
