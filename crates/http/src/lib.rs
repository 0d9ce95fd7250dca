//! HTTP/1.1 message framing over a raw byte stream
//!
//! This crate rebuilds requests from arbitrarily chunked socket reads and writes
//! responses through an ordered, stateful encoder. It does not depend on an HTTP
//! parsing library: request lines, header lines, content-length bodies and
//! chunked response framing are all handled here.
//!
//! # Features
//!
//! - Incremental request parsing that suspends only when bytes are missing
//! - Case-insensitive headers, repeated names combined with `", "`
//! - Content-Length request bodies
//! - Response writing with enforced section order
//! - Chunked response bodies with trailers
//! - One task per connection over tokio, one response per connection
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use http::StatusCode;
//! use tokio::io::AsyncWrite;
//! use tracing::{info, Level};
//! use tracing_subscriber::FmtSubscriber;
//! use bare_http::connection::ResponseWriter;
//! use bare_http::handler::Handler;
//! use bare_http::protocol::{default_headers, Headers, Request, SendError};
//! use bare_http::server::Server;
//!
//! struct Streaming;
//!
//! #[async_trait]
//! impl Handler for Streaming {
//!     async fn call<W>(&self, request: Request, writer: &mut ResponseWriter<W>) -> Result<(), SendError>
//!     where
//!         W: AsyncWrite + Unpin + Send,
//!     {
//!         info!(request_target = request.target(), "request");
//!         let mut headers = default_headers(0);
//!         headers.remove("content-length");
//!         headers.set("Transfer-Encoding", "chunked").unwrap();
//!         headers.set("Trailer", "X-Content-Length").unwrap();
//!
//!         writer.write_status_line(StatusCode::OK).await?;
//!         writer.write_headers(&headers).await?;
//!         writer.write_chunked_body(b"Hello, ").await?;
//!         writer.write_chunked_body(b"world!").await?;
//!         writer.write_chunked_body_done().await?;
//!
//!         let mut trailers = Headers::new();
//!         trailers.set("X-Content-Length", "13").unwrap();
//!         writer.write_trailers(&trailers).await
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     let server = Server::builder().address("127.0.0.1:42069").bind().await.unwrap();
//!     server.serve(Arc::new(Streaming)).await;
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: data model and errors ([`protocol::Headers`], [`protocol::Request`])
//! - [`codec`]: sans-IO request decoding and response section encoding
//! - [`connection`]: the per-connection worker and the ordered [`connection::ResponseWriter`]
//! - [`handler`]: the application callback trait
//! - [`server`]: the accept loop and its shutdown handle
//!
//! ## Error Handling
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Request parsing errors, each one rejects the whole request
//! - [`protocol::SendError`]: Response writing errors, including out of order writes
//!
//! # Limitations
//!
//! - HTTP/1.1 only, no TLS, no HTTP/2
//! - No keep-alive, every response closes the connection
//! - No chunked request bodies
//! - No header line folding

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
