//! Core HTTP protocol types.
//!
//! This module holds the data model shared by the parsing and encoding sides:
//!
//! - **Headers** ([`headers`]): case-normalized header storage
//!   - [`Headers`]: lower-cased names, `", "` combination of repeated names,
//!     and the incremental one-line [`Headers::parse`]
//!
//! - **Request** ([`request`]): the structured result of parsing
//!   - [`RequestLine`]: method, target and version
//!   - [`Request`]: request line, headers and body bytes
//!
//! - **Response** ([`response`]): response-side helpers
//!   - [`WriterState`]: the phases a response moves through
//!   - [`reason_phrase`] and [`default_headers`]
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Request parsing errors
//!   - [`SendError`]: Response writing errors
//!
//! - **Payload framing**: [`PayloadItem`], a body chunk or the EOF marker

mod message;
pub use message::PayloadItem;

mod headers;
pub use headers::Headers;
pub use headers::Iter as HeadersIter;
pub(crate) use headers::find_crlf;

mod request;
pub use request::Request;
pub use request::RequestLine;

mod response;
pub use response::WriterState;
pub use response::default_headers;
pub use response::reason_phrase;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
