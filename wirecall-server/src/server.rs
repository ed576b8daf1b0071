//! TCP server implementation.

use crate::error::ServerError;
use crate::registry::Registry;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use wirecall_protocol::{read_frame, write_frame, DEFAULT_PORT, STATUS_OK};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Maximum concurrent connections.
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            max_connections: 1000,
        }
    }
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }
}

/// Server statistics.
#[derive(Debug, Default)]
pub struct ServerStats {
    pub connections_total: AtomicU64,
    pub connections_active: AtomicU64,
    pub requests_total: AtomicU64,
    pub errors_total: AtomicU64,
}

/// TCP server for wirecall.
///
/// Owns an immutable [`Registry`] shared read-only by every connection
/// task. Each accepted connection runs fully isolated in its own task;
/// within one connection, frames are handled strictly in order with no
/// pipelining, so a slow handler stalls only its own connection.
pub struct Server {
    config: ServerConfig,
    registry: Arc<Registry>,
    stats: Arc<ServerStats>,
    shutdown: broadcast::Sender<()>,
    running: AtomicBool,
}

impl Server {
    /// Creates a new server over a registry built before serving starts.
    pub fn new(config: ServerConfig, registry: Registry) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            registry: Arc::new(registry),
            stats: Arc::new(ServerStats::default()),
            shutdown: shutdown_tx,
            running: AtomicBool::new(false),
        }
    }

    /// Binds the configured address and serves until shutdown.
    pub async fn run(&self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener).await
    }

    /// Accepts connections on an existing listener until shutdown.
    ///
    /// Accept errors are logged and never fatal; each accepted
    /// connection is handed to its own task immediately so the accept
    /// loop never blocks on connection handling.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        self.running.store(true, Ordering::SeqCst);
        tracing::info!(
            "Server listening on {} ({} methods registered)",
            listener.local_addr()?,
            self.registry.method_count()
        );

        let mut shutdown_rx = self.shutdown.subscribe();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            if self.stats.connections_active.load(Ordering::Relaxed)
                                >= self.config.max_connections as u64
                            {
                                tracing::warn!("Connection limit reached, rejecting {}", addr);
                                continue;
                            }

                            self.stats.connections_total.fetch_add(1, Ordering::Relaxed);
                            self.stats.connections_active.fetch_add(1, Ordering::Relaxed);

                            let registry = self.registry.clone();
                            let stats = self.stats.clone();

                            tokio::spawn(async move {
                                tracing::info!("Client connected: {}", addr);
                                let result =
                                    Self::handle_connection(stream, addr, registry, &stats).await;

                                if let Err(e) = result {
                                    tracing::error!("Connection {} error: {}", addr, e);
                                    stats.errors_total.fetch_add(1, Ordering::Relaxed);
                                }

                                stats.connections_active.fetch_sub(1, Ordering::Relaxed);
                                tracing::info!("Client disconnected: {}", addr);
                            });
                        }
                        Err(e) => {
                            tracing::error!("Accept error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Server shutting down");
                    break;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Handles a single connection: read a frame, resolve its dispatch
    /// ID, invoke the handler, write the response, repeat.
    ///
    /// Any failure — framing, unknown dispatch ID, handler error, write
    /// error — terminates the loop and closes the connection without
    /// sending a response frame. A clean client close ends the loop
    /// without an error.
    async fn handle_connection(
        stream: TcpStream,
        addr: SocketAddr,
        registry: Arc<Registry>,
        stats: &ServerStats,
    ) -> Result<(), ServerError> {
        stream.set_nodelay(true).ok();
        let (mut reader, writer) = stream.into_split();
        let mut writer = BufWriter::new(writer);

        loop {
            let (header, payload) = match read_frame(&mut reader).await {
                Ok(frame) => frame,
                Err(e) if e.is_clean_close() => return Ok(()),
                Err(e) => return Err(e.into()),
            };

            tracing::debug!("[{}] Request frame: {}", addr, header);
            stats.requests_total.fetch_add(1, Ordering::Relaxed);

            let handle = registry
                .resolve(header.meta)
                .ok_or(ServerError::UnknownMethod(header.meta))?;

            let response = handle(payload).await.map_err(ServerError::Handler)?;

            Self::respond(&mut writer, header.session, &response).await?;
            tracing::debug!("[{}] Response written ({} bytes)", addr, response.len());
        }
    }

    /// Writes a success response frame, echoing the request's session
    /// and carrying the fixed success status in `meta`, then flushes.
    async fn respond(
        writer: &mut BufWriter<OwnedWriteHalf>,
        session: u16,
        payload: &[u8],
    ) -> Result<(), ServerError> {
        write_frame(writer, session, payload, STATUS_OK).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Initiates server shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(());
    }

    /// Returns whether the server is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Returns server statistics.
    pub fn stats(&self) -> &ServerStats {
        &self.stats
    }
}
