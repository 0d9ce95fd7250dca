//! Decoder implementation for request bodies delimited by a Content-Length header.

use std::cmp;

use crate::protocol::{ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for a body of known length.
///
/// The decoder tracks the remaining bytes to be read and never takes more than
/// that from the buffer, so bytes following the body stay where they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The number of bytes remaining to be read from the payload
    length: u64,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder expecting exactly `length` bytes.
    pub fn new(length: u64) -> Self {
        Self { length }
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.length
    }
}

impl Decoder for LengthDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Decodes bytes from the input buffer according to the content length.
    ///
    /// # Returns
    /// * `Ok(Some(PayloadItem::Eof))` when all bytes have been read
    /// * `Ok(Some(PayloadItem::Chunk(bytes)))` when some bytes were taken from `src`
    /// * `Ok(None)` when more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.length == 0 {
            return Ok(Some(PayloadItem::Eof));
        }

        if src.is_empty() {
            return Ok(None);
        }

        // Read the minimum of remaining length and available bytes
        let len = cmp::min(self.length, src.len() as u64);
        #[allow(clippy::cast_possible_truncation, reason = "len is bounded by src.len()")]
        let bytes = src.split_to(len as usize).freeze();

        self.length -= bytes.len() as u64;
        Ok(Some(PayloadItem::Chunk(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut buffer: BytesMut = BytesMut::from(&b"101234567890abcdef\r\n\r\n"[..]);

        let mut length_decoder = LengthDecoder::new(10);
        let payload = length_decoder.decode(&mut buffer).unwrap().unwrap();

        assert!(payload.is_chunk());
        assert_eq!(payload, PayloadItem::Chunk(bytes::Bytes::from_static(b"1012345678")));
        assert_eq!(&buffer[..], b"90abcdef\r\n\r\n");

        assert!(length_decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
    }

    #[test]
    fn test_partial() {
        let mut length_decoder = LengthDecoder::new(5);

        let mut buffer = BytesMut::new();
        assert!(length_decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"he");
        let payload = length_decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(payload, PayloadItem::Chunk(bytes::Bytes::from_static(b"he")));
        assert_eq!(length_decoder.remaining(), 3);
        assert!(buffer.is_empty());

        buffer.extend_from_slice(b"llo");
        let payload = length_decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(payload, PayloadItem::Chunk(bytes::Bytes::from_static(b"llo")));
        assert!(length_decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
    }
}
