//! HTTP connection handling module
//!
//! This module is the I/O side of the crate, it binds the codecs to a transport.
//!
//! # Components
//!
//! - [`HttpConnection`]: the per-connection worker that:
//!   - Reads one request through a growable buffer
//!   - Invokes the [`Handler`](crate::handler::Handler) with a fresh writer
//!   - Answers unparseable requests with `400 Bad Request` when possible
//!   - Closes the connection afterwards
//!
//! - [`ResponseWriter`]: the ordered response encoder bound to the output half
//!
//! - [`read_request`]: the driving loop alone, for callers that bring their own
//!   response handling

mod http_connection;
mod response_writer;

pub use http_connection::{HttpConnection, read_request};
pub(crate) use http_connection::DEFAULT_READ_BUFFER_SIZE;
pub use response_writer::ResponseWriter;
