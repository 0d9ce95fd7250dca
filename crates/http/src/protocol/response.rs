use http::StatusCode;

use crate::protocol::Headers;

/// Phases of a response, in the only order they may be written.
///
/// The state is monotonic: each write operation of the
/// [`ResponseWriter`](crate::connection::ResponseWriter) requires one specific
/// predecessor and advances to the next state once the bytes have been written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum WriterState {
    Initial,
    StatusLineWritten,
    HeadersWritten,
    BodyWritten,
    TrailersWritten,
}

/// Returns the reason phrase sent for `status`.
///
/// Only 200, 400 and 500 have a phrase, any other code is sent with an empty one.
pub fn reason_phrase(status: StatusCode) -> &'static str {
    match status {
        StatusCode::OK => "OK",
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "",
    }
}

/// Builds the baseline response headers for a body of `content_length` bytes:
/// `Content-Length`, `Connection: close` and `Content-Type: text/plain`.
///
/// Callers customize the returned collection before writing it, e.g. with
/// [`Headers::replace`] for the content type.
pub fn default_headers(content_length: usize) -> Headers {
    let mut headers = Headers::new();
    headers.append_normalized("content-length".to_string(), &content_length.to_string());
    headers.append_normalized("connection".to_string(), "close");
    headers.append_normalized("content-type".to_string(), "text/plain");
    headers
}
