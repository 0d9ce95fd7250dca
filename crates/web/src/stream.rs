use bare_http::connection::ResponseWriter;
use bare_http::protocol::{Headers, SendError, default_headers};
use http::StatusCode;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWrite;
use tracing::debug;

/// Streams `count` text frames as a chunked body, one chunk per frame.
///
/// The body is followed by two trailers, announced up front in the `Trailer`
/// header: `X-Content-SHA256` with the hex digest of the whole body, and
/// `X-Content-Length` with its length in bytes.
///
/// # Errors
///
/// Returns the [`SendError`] of the first section that failed to write.
pub async fn write_stream<W>(writer: &mut ResponseWriter<W>, count: usize) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
{
    let mut headers = default_headers(0);
    headers.remove("content-length");
    headers.set("Transfer-Encoding", "chunked")?;
    headers.set("Trailer", "X-Content-SHA256")?;
    headers.set("Trailer", "X-Content-Length")?;

    writer.write_status_line(StatusCode::OK).await?;
    writer.write_headers(&headers).await?;

    let mut hasher = Sha256::new();
    let mut content_length = 0;
    for index in 1..=count {
        let frame = format!("frame {index} of {count}\n");
        content_length += writer.write_chunked_body(frame.as_bytes()).await?;
        hasher.update(frame.as_bytes());
    }
    writer.write_chunked_body_done().await?;
    debug!(frames = count, content_length, "chunked body finished");

    let mut trailers = Headers::new();
    trailers.set("X-Content-SHA256", &format!("{:x}", hasher.finalize()))?;
    trailers.set("X-Content-Length", &content_length.to_string())?;
    writer.write_trailers(&trailers).await
}
