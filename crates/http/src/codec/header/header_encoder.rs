//! Encoders for the status line and for header-style sections
//!
//! [`StatusLineEncoder`] writes `HTTP/1.1 <code> <reason>\r\n`. [`HeaderEncoder`]
//! writes one `name: value\r\n` line per entry followed by the blank line; it is
//! used both for the header section and for the trailer section of a chunked
//! response, which share the same grammar.

use bytes::{BufMut, BytesMut};
use http::StatusCode;
use std::io::Write;
use tokio_util::codec::Encoder;

use crate::codec::FastWrite;
use crate::protocol::{Headers, SendError, reason_phrase};

/// Encoder for the response status line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusLineEncoder;

impl Encoder<StatusCode> for StatusLineEncoder {
    type Error = SendError;

    fn encode(&mut self, status: StatusCode, dst: &mut BytesMut) -> Result<(), Self::Error> {
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), reason_phrase(status))?;
        Ok(())
    }
}

/// Encoder for a header or trailer section.
///
/// Entries are written in the collection's iteration order, which is unspecified.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl Encoder<&Headers> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, headers: &Headers, dst: &mut BytesMut) -> Result<(), Self::Error> {
        for (name, value) in headers {
            dst.reserve(name.len() + value.len() + 4);
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::default_headers;

    #[test]
    fn status_line_with_reason() {
        let mut dst = BytesMut::new();
        StatusLineEncoder.encode(StatusCode::OK, &mut dst).unwrap();
        StatusLineEncoder.encode(StatusCode::BAD_REQUEST, &mut dst).unwrap();
        StatusLineEncoder.encode(StatusCode::INTERNAL_SERVER_ERROR, &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\nHTTP/1.1 400 Bad Request\r\nHTTP/1.1 500 Internal Server Error\r\n");
    }

    #[test]
    fn status_line_without_reason() {
        let mut dst = BytesMut::new();
        StatusLineEncoder.encode(StatusCode::NOT_FOUND, &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 404 \r\n");
    }

    #[test]
    fn empty_section_is_blank_line() {
        let mut dst = BytesMut::new();
        HeaderEncoder.encode(&Headers::new(), &mut dst).unwrap();

        assert_eq!(&dst[..], b"\r\n");
    }

    #[test]
    fn every_entry_on_its_own_line() {
        let mut dst = BytesMut::new();
        HeaderEncoder.encode(&default_headers(42), &mut dst).unwrap();

        let text = std::str::from_utf8(&dst).unwrap();
        assert!(text.ends_with("\r\n\r\n"));

        let mut lines: Vec<&str> = text.trim_end_matches("\r\n").split("\r\n").collect();
        lines.sort_unstable();
        assert_eq!(lines, ["connection: close", "content-length: 42", "content-type: text/plain"]);
    }

    #[test]
    fn encoded_section_parses_back() {
        let mut original = Headers::new();
        original.set("X-Content-SHA256", "deadbeef").unwrap();
        original.set("X-Content-Length", "1024").unwrap();
        original.set("Vary", "a").unwrap();
        original.set("Vary", "b").unwrap();

        let mut dst = BytesMut::new();
        HeaderEncoder.encode(&original, &mut dst).unwrap();

        let mut parsed = Headers::new();
        let mut src = &dst[..];
        loop {
            let (consumed, done) = parsed.parse(src).unwrap();
            src = &src[consumed..];
            if done {
                break;
            }
        }

        assert!(src.is_empty());
        assert_eq!(parsed, original);
    }
}
