//! HTTP request decoder module
//!
//! This module turns an accumulating byte stream into a [`Request`]. It never
//! blocks and never needs the whole message at once: each call to
//! [`Decoder::decode`] advances as far as the bytes currently in the buffer
//! allow, and leaves whatever it could not use in the buffer for the next call.
//!
//! # State Machine
//!
//! ```text
//! ParsingRequestLine -> ParsingHeaders -> ParsingBody -> Done
//!                                      \--------------->/
//! ```
//!
//! The body state is skipped when the request has no `Content-Length` (or a
//! length of zero). States are never rewound.
//!
//! # Example
//!
//! ```
//! use bare_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET / HTTP/1.1\r\nHost: loc");
//! assert!(decoder.decode(&mut buffer).unwrap().is_none());
//!
//! buffer.extend_from_slice(b"alhost\r\n\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.headers().get("host"), Some("localhost"));
//! ```

use std::mem;

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::body::LengthDecoder;
use crate::codec::request_line::parse_request_line;
use crate::protocol::{Headers, ParseError, PayloadItem, Request, RequestLine, find_crlf};

/// Upper bound of the body capacity reserved up front from a declared length
const MAX_BODY_RESERVE: u64 = 64 * 1024;

/// Phases of request parsing, in order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParserState {
    ParsingRequestLine,
    ParsingHeaders,
    ParsingBody,
    Done,
}

/// A decoder producing one [`Request`] from a byte stream.
///
/// The decoder keeps the partially parsed request between calls. Once it has
/// returned the request it stays in [`ParserState::Done`] and yields nothing else.
#[derive(Debug)]
pub struct RequestDecoder {
    state: ParserState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body_decoder: Option<LengthDecoder>,
    body: BytesMut,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current parsing phase.
    #[inline]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Returns the headers parsed so far.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    fn transition(&mut self, next: ParserState) {
        trace!(from = ?self.state, to = ?next, "request parser transition");
        self.state = next;
    }

    /// Picks the body framing once the header section is complete.
    fn finish_headers(&mut self) -> Result<(), ParseError> {
        let Some(value) = self.headers.get(http::header::CONTENT_LENGTH.as_str()) else {
            self.transition(ParserState::Done);
            return Ok(());
        };

        let length =
            value.trim().parse::<u64>().map_err(|_| ParseError::invalid_content_length(format!("value {value:?} is not u64")))?;

        if length == 0 {
            self.transition(ParserState::Done);
            return Ok(());
        }

        #[allow(clippy::cast_possible_truncation, reason = "bounded by MAX_BODY_RESERVE")]
        self.body.reserve(length.min(MAX_BODY_RESERVE) as usize);
        self.body_decoder = Some(LengthDecoder::new(length));
        self.transition(ParserState::ParsingBody);
        Ok(())
    }

    /// Hands out the completed request, only once.
    fn take_request(&mut self) -> Option<Request> {
        let line = self.request_line.take()?;
        let headers = mem::take(&mut self.headers);
        let body = mem::take(&mut self.body).freeze();
        Some(Request::new(line, headers, body))
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self {
            state: ParserState::ParsingRequestLine,
            request_line: None,
            headers: Headers::new(),
            body_decoder: None,
            body: BytesMut::new(),
        }
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Feeds the bytes currently available in `src` to the parser.
    ///
    /// Consumed bytes are removed from the front of `src`; a partial line is left
    /// in place until the rest of it arrives.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: the request is complete
    /// - `Ok(None)`: need more data to proceed (or the request was already returned)
    /// - `Err(_)`: the request is malformed, the whole request is rejected
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                ParserState::ParsingRequestLine => {
                    let Some(line_end) = find_crlf(src) else {
                        return Ok(None);
                    };

                    let request_line = parse_request_line(&src[..line_end])?;
                    trace!(method = %request_line.method(), request_target = request_line.target(), "parsed request line");
                    src.advance(line_end + 2);

                    self.request_line = Some(request_line);
                    self.transition(ParserState::ParsingHeaders);
                }

                ParserState::ParsingHeaders => {
                    let (consumed, done) = self.headers.parse(src)?;
                    src.advance(consumed);

                    if done {
                        self.finish_headers()?;
                    } else if consumed == 0 {
                        return Ok(None);
                    }
                }

                ParserState::ParsingBody => {
                    let Some(body_decoder) = self.body_decoder.as_mut() else {
                        self.transition(ParserState::Done);
                        continue;
                    };

                    match body_decoder.decode(src)? {
                        Some(PayloadItem::Chunk(bytes)) => {
                            trace!(len = bytes.len(), remaining = body_decoder.remaining(), "read body bytes");
                            self.body.extend_from_slice(&bytes);
                        }
                        Some(PayloadItem::Eof) => {
                            self.body_decoder.take();
                            self.transition(ParserState::Done);
                        }
                        None => return Ok(None),
                    }
                }

                ParserState::Done => return Ok(self.take_request()),
            }
        }
    }

    /// Called once the transport reached end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnexpectedEndOfStream`] if the request is not complete
    /// with the bytes left in `src`.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            None if self.state == ParserState::Done => Ok(None),
            None => Err(ParseError::UnexpectedEndOfStream),
        }
    }
}
