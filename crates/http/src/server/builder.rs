use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::connection::DEFAULT_READ_BUFFER_SIZE;
use crate::server::{Server, ShutdownHandle};

/// Per-connection settings applied by the [`Server`] to every accepted connection.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Initial capacity of each connection's read buffer
    pub read_buffer_size: usize,
    /// Deadline for receiving a complete request, `None` waits forever
    pub read_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { read_buffer_size: DEFAULT_READ_BUFFER_SIZE, read_timeout: None }
    }
}

#[derive(Debug)]
pub struct ServerBuilder {
    address: Option<io::Result<Vec<SocketAddr>>>,
    config: ServerConfig,
    shutdown: Option<ShutdownHandle>,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
    #[error("bind server error: {source}")]
    Bind { source: io::Error },
}

impl ServerBuilder {
    pub(crate) fn new() -> Self {
        Self { address: None, config: ServerConfig::default(), shutdown: None }
    }

    #[must_use]
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    #[must_use]
    pub fn read_buffer_size(mut self, read_buffer_size: usize) -> Self {
        self.config.read_buffer_size = read_buffer_size;
        self
    }

    /// Sets the deadline for receiving a complete request.
    ///
    /// Defaults to `None`: a peer that stalls mid-request holds its task until it
    /// disconnects.
    #[must_use]
    pub fn read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.config.read_timeout = read_timeout;
        self
    }

    /// Uses an existing handle instead of creating a fresh one.
    #[must_use]
    pub fn shutdown_handle(mut self, shutdown: ShutdownHandle) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Binds the listening socket.
    ///
    /// # Errors
    ///
    /// Returns [`ServerBuildError`] if no address was set, the address could not
    /// be resolved, or binding failed.
    pub async fn bind(self) -> Result<Server, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(|source| ServerBuildError::InvalidAddress { source })?;

        let listener = match TcpListener::bind(address.as_slice()).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(ServerBuildError::Bind { source: e });
            }
        };

        info!(address = ?listener.local_addr().ok(), "server bound");
        Ok(Server::new(listener, self.config, self.shutdown.unwrap_or_default()))
    }
}
