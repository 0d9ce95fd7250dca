//! Parsed HTTP request types.
//!
//! A [`Request`] is produced once by the [`RequestDecoder`](crate::codec::RequestDecoder)
//! when it reaches its terminal state, and is immutable from then on.

use bytes::Bytes;
use http::{Method, Version};

use crate::protocol::Headers;

/// The first line of a request: `METHOD SP TARGET SP HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    target: String,
    version: Version,
}

impl RequestLine {
    pub(crate) fn new(method: Method, target: String, version: Version) -> Self {
        Self { method, target, version }
    }

    /// Returns the request method, made of upper-case letters only.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request target exactly as it appeared on the wire.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Always `HTTP/1.1`, other versions are rejected while parsing.
    pub fn version(&self) -> Version {
        self.version
    }
}

/// A complete request: request line, header collection and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    line: RequestLine,
    headers: Headers,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(line: RequestLine, headers: Headers, body: Bytes) -> Self {
        Self { line, headers, body }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> &Method {
        self.line.method()
    }

    pub fn target(&self) -> &str {
        self.line.target()
    }

    pub fn version(&self) -> Version {
        self.line.version()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body, empty when the request carried no `Content-Length`.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the request and returns its parts.
    pub fn into_parts(self) -> (RequestLine, Headers, Bytes) {
        (self.line, self.headers, self.body)
    }
}
