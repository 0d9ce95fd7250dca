//! Request line parsing: `METHOD SP TARGET SP HTTP/1.1`.

use http::{Method, Version};

use crate::ensure;
use crate::protocol::{ParseError, RequestLine};

/// The only version accepted on the request line
const HTTP_11: &str = "HTTP/1.1";

/// Parses one request line, without its `CRLF` terminator.
///
/// The line must split on single spaces into exactly three fields. The method
/// must be made of upper-case ASCII letters and the version must be `HTTP/1.1`.
///
/// # Errors
///
/// - [`ParseError::MalformedRequestLine`] for a wrong number of fields, an empty
///   target, a method with other characters, or bytes that are not UTF-8
/// - [`ParseError::UnsupportedVersion`] for any version other than `HTTP/1.1`
pub(crate) fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let line = std::str::from_utf8(line).map_err(|e| ParseError::malformed_request_line(format!("not utf-8: {e}")))?;

    let mut parts = line.split(' ');
    let (Some(method), Some(target), Some(version), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::malformed_request_line(format!("expected 3 parts in {line:?}")));
    };

    ensure!(
        !method.is_empty() && method.bytes().all(|b| b.is_ascii_uppercase()),
        ParseError::malformed_request_line(format!("invalid method {method:?}"))
    );
    ensure!(!target.is_empty(), ParseError::malformed_request_line("empty request target"));
    ensure!(version == HTTP_11, ParseError::unsupported_version(version));

    let method =
        Method::from_bytes(method.as_bytes()).map_err(|e| ParseError::malformed_request_line(format!("invalid method: {e}")))?;

    Ok(RequestLine::new(method, target.to_string(), Version::HTTP_11))
}
