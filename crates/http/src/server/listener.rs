use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::select;
use tracing::{debug, error, info, warn};

use crate::connection::HttpConnection;
use crate::handler::Handler;
use crate::server::{ServerBuilder, ServerConfig, ShutdownHandle};

/// A bound listener serving one [`Handler`].
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    config: ServerConfig,
    shutdown: ShutdownHandle,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub(crate) fn new(listener: TcpListener, config: ServerConfig, shutdown: ShutdownHandle) -> Self {
        Self { listener, config, shutdown }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns a handle that stops [`Server::serve`].
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Accepts connections until shutdown is requested.
    ///
    /// Every connection runs in its own task and is closed after one response.
    /// Connections already accepted keep running after this returns.
    pub async fn serve<H>(self, handler: Arc<H>)
    where
        H: Handler + 'static,
    {
        info!(address = ?self.local_addr().ok(), "start accepting connections");

        loop {
            if self.shutdown.is_shutdown() {
                break;
            }

            let accepted = select! {
                accepted = self.listener.accept() => accepted,
                () = self.shutdown.notified() => break,
            };

            let (tcp_stream, remote_addr) = match accepted {
                Ok(stream_and_addr) => stream_and_addr,
                Err(_) if self.shutdown.is_shutdown() => break,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            debug!(%remote_addr, "accepted connection");
            let handler = Arc::clone(&handler);
            let config = self.config.clone();

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection =
                    HttpConnection::with_capacity(reader, writer, config.read_buffer_size).read_timeout(config.read_timeout);
                match connection.process(handler).await {
                    Ok(()) => {
                        debug!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, cause = %e, "service has error, connection shutdown");
                    }
                }
            });
        }

        info!("server stopped accepting connections");
    }
}
