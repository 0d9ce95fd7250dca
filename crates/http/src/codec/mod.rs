//! HTTP codec module for decoding requests and encoding responses
//!
//! This module holds the sans-IO part of the crate: everything here works on
//! `BytesMut` buffers and never touches a socket.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: a state machine turning an accumulating buffer into a
//!     [`Request`](crate::protocol::Request), implementing [`Decoder`](tokio_util::codec::Decoder)
//!   - Body framing through a content-length decoder
//!
//! - Response handling:
//!   - [`StatusLineEncoder`]: `HTTP/1.1 <code> <reason>` line
//!   - [`HeaderEncoder`]: header and trailer sections
//!   - [`ChunkedEncoder`]: chunked transfer framing
//!
//! The ordering of the response sections is enforced one level up, by the
//! [`ResponseWriter`](crate::connection::ResponseWriter).
//!
//! # Example
//!
//! ```
//! use bare_http::codec::{ChunkedEncoder, HeaderEncoder, StatusLineEncoder};
//! use bare_http::protocol::{default_headers, PayloadItem};
//! use bytes::{Bytes, BytesMut};
//! use http::StatusCode;
//! use tokio_util::codec::Encoder;
//!
//! let mut dst = BytesMut::new();
//! StatusLineEncoder.encode(StatusCode::OK, &mut dst).unwrap();
//! HeaderEncoder.encode(&default_headers(2), &mut dst).unwrap();
//!
//! let mut chunked = ChunkedEncoder::new();
//! chunked.encode(PayloadItem::Chunk(Bytes::from_static(b"hi")), &mut dst).unwrap();
//! chunked.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();
//! assert!(dst.ends_with(b"2\r\nhi\r\n0\r\n"));
//! ```

use bytes::{BufMut, BytesMut};
use std::io;

mod body;
mod header;
mod request_decoder;
mod request_line;

pub use body::ChunkedEncoder;
pub use header::{HeaderEncoder, StatusLineEncoder};
pub use request_decoder::{ParserState, RequestDecoder};

/// Fast writer implementation for writing formatted text to `BytesMut`.
struct FastWrite<'a>(&'a mut BytesMut);

impl io::Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
