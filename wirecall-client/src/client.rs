//! RPC client connection.

use crate::error::ClientError;
use bytes::Bytes;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use wirecall_protocol::{read_frame, write_frame, Header};

/// An RPC client over one exclusively-owned TCP connection.
///
/// The client tracks a per-connection session counter that starts at 0
/// and is incremented (wrapping at `u16::MAX`) before every send. The
/// counter is advisory correlation state: requests on one connection are
/// processed strictly in order, so responses arrive in request order.
///
/// Sending and receiving take `&mut self`, which confines the session
/// counter to one exclusive owner; callers that want to share a client
/// across tasks must wrap it in their own synchronization.
pub struct Client {
    reader: OwnedReadHalf,
    writer: BufWriter<OwnedWriteHalf>,
    session: u16,
}

impl Client {
    /// Connects to a wirecall server.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true).ok();
        let peer = stream.peer_addr()?;
        tracing::debug!("Connected to {}", peer);
        Ok(Self::from_stream(stream))
    }

    /// Wraps an already-established connection.
    pub fn from_stream(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader,
            writer: BufWriter::new(writer),
            session: 0,
        }
    }

    /// Returns the session value assigned to the most recent send.
    pub fn session(&self) -> u16 {
        self.session
    }

    /// Sends one request frame.
    ///
    /// Increments the session counter, writes the frame with `meta` as
    /// the routing field, and flushes so the frame is fully transmitted
    /// before returning. Any error here is connection-fatal.
    pub async fn send(&mut self, payload: &[u8], meta: u32) -> Result<(), ClientError> {
        self.session = self.session.wrapping_add(1);
        write_frame(&mut self.writer, self.session, payload, meta).await?;
        self.writer.flush().await?;
        tracing::debug!(
            "Sent frame: session={} meta={} ({} bytes)",
            self.session,
            meta,
            payload.len()
        );
        Ok(())
    }

    /// Receives one response frame, blocking until a full frame or an
    /// error arrives.
    pub async fn receive(&mut self) -> Result<(Header, Bytes), ClientError> {
        let (header, payload) = read_frame(&mut self.reader).await?;
        tracing::debug!("Received frame: {}", header);
        Ok((header, payload))
    }

    /// Sends a request and waits for its response; the common call path
    /// for a synchronous RPC. Returns the response payload.
    pub async fn send_receive(&mut self, payload: &[u8], meta: u32) -> Result<Bytes, ClientError> {
        self.send(payload, meta).await?;
        let (_, response) = self.receive().await?;
        Ok(response)
    }

    /// Closes the connection.
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.writer.shutdown().await?;
        tracing::debug!("Connection closed");
        Ok(())
    }
}
