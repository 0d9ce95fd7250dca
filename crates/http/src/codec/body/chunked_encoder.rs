use crate::codec::FastWrite;
use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BytesMut};
use std::io::Write;

use tokio_util::codec::Encoder;
use tracing::warn;

/// Encoder for chunked transfer framing.
///
/// Each chunk becomes `<hex-length>\r\n<bytes>\r\n`; [`PayloadItem::Eof`] writes
/// the terminal `0\r\n`. The blank line that ends the message belongs to the
/// trailer section and is written by the [`HeaderEncoder`](crate::codec::HeaderEncoder).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkedEncoder {
    eof: bool,
    send_size: usize,
}

impl ChunkedEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once the terminal chunk has been encoded.
    #[inline]
    pub fn is_finish(&self) -> bool {
        self.eof
    }

    /// Number of payload bytes framed so far, excluding framing overhead.
    #[inline]
    pub fn send_size(&self) -> usize {
        self.send_size
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for ChunkedEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.eof {
            warn!("encode payload_item after the terminal chunk");
            return Ok(());
        }

        match item {
            PayloadItem::Chunk(mut bytes) => {
                let size = bytes.remaining();
                // a zero sized frame would terminate the body
                if size == 0 {
                    return Ok(());
                }

                write!(FastWrite(dst), "{size:x}\r\n")?;
                dst.reserve(size + 2);
                while bytes.has_remaining() {
                    let chunk = bytes.chunk();
                    let len = chunk.len();
                    dst.extend_from_slice(chunk);
                    bytes.advance(len);
                }
                dst.extend_from_slice(b"\r\n");
                self.send_size += size;
                Ok(())
            }
            PayloadItem::Eof => {
                self.eof = true;
                dst.extend_from_slice(b"0\r\n");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn frames_and_terminator() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(&b"abc"[..]), &mut dst).unwrap();
        encoder.encode(PayloadItem::Chunk(&b"de"[..]), &mut dst).unwrap();
        encoder.encode(PayloadItem::<&[u8]>::Eof, &mut dst).unwrap();

        assert_eq!(&dst[..], b"3\r\nabc\r\n2\r\nde\r\n0\r\n");
        assert!(encoder.is_finish());
        assert_eq!(encoder.send_size(), 5);
    }

    #[test]
    fn length_is_lower_case_hex() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        let payload = Bytes::from(vec![b'x'; 26]);
        encoder.encode(PayloadItem::Chunk(payload), &mut dst).unwrap();

        assert!(dst.starts_with(b"1a\r\n"));
        assert_eq!(dst.len(), 4 + 26 + 2);
    }

    #[test]
    fn empty_chunk_is_skipped() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(Bytes::new()), &mut dst).unwrap();

        assert!(dst.is_empty());
        assert!(!encoder.is_finish());
    }

    #[test]
    fn nothing_after_terminator() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();
        encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"late")), &mut dst).unwrap();

        assert_eq!(&dst[..], b"0\r\n");
    }
}
