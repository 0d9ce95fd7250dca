//! HTTP body framing
//!
//! - [`LengthDecoder`]: reads a request body of known `Content-Length`
//! - [`ChunkedEncoder`]: frames a response body with chunked transfer encoding
//!
//! Requests with chunked bodies are not supported, only responses are chunked.

mod chunked_encoder;
mod length_decoder;

pub use chunked_encoder::ChunkedEncoder;
pub use length_decoder::LengthDecoder;
