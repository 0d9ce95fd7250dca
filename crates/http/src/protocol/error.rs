use std::io;
use thiserror::Error;

use crate::protocol::WriterState;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Errors raised while turning raw bytes into a [`Request`](crate::protocol::Request).
///
/// Every variant rejects the whole request: there is no resynchronization
/// inside a connection once one of these has been returned.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed header name: {name:?}")]
    MalformedHeaderName { name: String },

    #[error("invalid header token found: {name:?}")]
    InvalidHeaderToken { name: String },

    #[error("invalid header value for {name:?}: {reason}")]
    InvalidHeaderValue { name: String, reason: String },

    #[error("malformed request line: {reason}")]
    MalformedRequestLine { reason: String },

    #[error("unsupported http version: {version:?}")]
    UnsupportedVersion { version: String },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_header_name<S: ToString>(name: S) -> Self {
        Self::MalformedHeaderName { name: name.to_string() }
    }

    pub fn invalid_header_token<S: ToString>(name: S) -> Self {
        Self::InvalidHeaderToken { name: name.to_string() }
    }

    pub fn invalid_header_value<S: ToString, R: ToString>(name: S, reason: R) -> Self {
        Self::InvalidHeaderValue { name: name.to_string(), reason: reason.to_string() }
    }

    pub fn malformed_request_line<S: ToString>(reason: S) -> Self {
        Self::MalformedRequestLine { reason: reason.to_string() }
    }

    pub fn unsupported_version<S: ToString>(version: S) -> Self {
        Self::UnsupportedVersion { version: version.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(reason: S) -> Self {
        Self::InvalidContentLength { reason: reason.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Errors raised while writing a response.
///
/// Every variant is fatal for the current response; the connection is torn
/// down rather than retried.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("out of order write: {operation} is not allowed in state {state:?}")]
    OutOfOrderWrite { operation: &'static str, state: WriterState },

    #[error("invalid response header: {source}")]
    InvalidHeader {
        #[from]
        source: ParseError,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn out_of_order(operation: &'static str, state: WriterState) -> Self {
        Self::OutOfOrderWrite { operation, state }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true if this error comes from calling the writer out of order.
    #[inline]
    pub fn is_out_of_order(&self) -> bool {
        matches!(self, SendError::OutOfOrderWrite { .. })
    }
}
