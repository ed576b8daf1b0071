//! Async frame reading and writing over a byte stream.
//!
//! A frame is a 16-byte header followed by exactly `header.size` payload
//! bytes. Reads block until the requested bytes arrive; a short read is a
//! framing error. Writes are two sequential writes (header, payload) with
//! no implicit flush, so a write failure leaves the stream mid-frame and
//! the caller must treat it as connection-fatal.

use crate::checksum::payload_checksum;
use crate::error::ProtocolError;
use crate::header::{Header, HEADER_SIZE};
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Reads exactly one header from the stream.
///
/// End-of-stream before the first byte is reported as
/// [`ProtocolError::ConnectionClosed`]; end-of-stream inside the header
/// as [`ProtocolError::IncompleteHeader`].
pub async fn read_header<R>(stream: &mut R) -> Result<Header, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; HEADER_SIZE];
    let mut filled = 0;
    while filled < HEADER_SIZE {
        let n = stream.read(&mut buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Err(ProtocolError::ConnectionClosed);
            }
            return Err(ProtocolError::IncompleteHeader { got: filled });
        }
        filled += n;
    }
    Header::decode(&buf)
}

/// Reads exactly `header.size` payload bytes from the stream and
/// verifies them against the header's checksum.
pub async fn read_payload<R>(stream: &mut R, header: &Header) -> Result<Bytes, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut payload = vec![0u8; header.size as usize];
    stream.read_exact(&mut payload).await?;

    let actual = payload_checksum(&payload);
    if actual != header.checksum {
        return Err(ProtocolError::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }

    Ok(Bytes::from(payload))
}

/// Reads one complete frame (header, then payload).
pub async fn read_frame<R>(stream: &mut R) -> Result<(Header, Bytes), ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let header = read_header(stream).await?;
    let payload = read_payload(stream, &header).await?;
    Ok((header, payload))
}

/// Writes one frame: the encoded header, then the payload.
///
/// Does not flush; callers flush once a logical message is complete.
pub async fn write_frame<W>(
    stream: &mut W,
    session: u16,
    payload: &[u8],
    meta: u32,
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let header = Header::encode(session, payload, meta)?;
    stream.write_all(&header).await?;
    stream.write_all(payload).await?;
    Ok(())
}
