//! TCP accept loop.
//!
//! [`Server`] accepts connections and spawns one independent task per
//! connection; tasks never share parser or writer state. A [`ShutdownHandle`]
//! stops the loop: accept errors seen after shutdown was requested end the loop
//! silently, any other accept error is logged and the loop keeps accepting.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use bare_http::connection::ResponseWriter;
//! use bare_http::handler::Handler;
//! use bare_http::protocol::{default_headers, Request, SendError};
//! use bare_http::server::Server;
//! use http::StatusCode;
//! use tokio::io::AsyncWrite;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn call<W>(&self, _request: Request, writer: &mut ResponseWriter<W>) -> Result<(), SendError>
//!     where
//!         W: AsyncWrite + Unpin + Send,
//!     {
//!         writer.write_status_line(StatusCode::OK).await?;
//!         writer.write_headers(&default_headers(5)).await?;
//!         writer.write_body(b"hello").await?;
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = Server::builder().address("127.0.0.1:42069").bind().await?;
//! let shutdown = server.shutdown_handle();
//! tokio::spawn(async move {
//!     let _ = tokio::signal::ctrl_c().await;
//!     shutdown.shutdown();
//! });
//! server.serve(Arc::new(Hello)).await;
//! # Ok(())
//! # }
//! ```

mod builder;
mod listener;
mod shutdown;

pub use builder::{ServerBuildError, ServerBuilder, ServerConfig};
pub use listener::Server;
pub use shutdown::ShutdownHandle;
