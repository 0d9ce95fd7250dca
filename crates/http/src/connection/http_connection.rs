use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use http::StatusCode;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info, warn};

use crate::codec::RequestDecoder;
use crate::connection::ResponseWriter;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, SendError, WriterState, default_headers};

/// Initial capacity of the growable read buffer
pub(crate) const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Reads one complete request from `reader`.
///
/// Bytes are read into a growable buffer and fed to a [`RequestDecoder`] until it
/// returns the request.
///
/// # Errors
///
/// - [`ParseError::UnexpectedEndOfStream`] if the stream ends first
/// - any parse error reported by the decoder, with no partial request exposed
/// - [`ParseError::Io`] if reading from the transport fails
pub async fn read_request<R>(reader: R) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut framed_read = FramedRead::with_capacity(reader, RequestDecoder::new(), DEFAULT_READ_BUFFER_SIZE);
    next_request(&mut framed_read).await
}

async fn next_request<R>(framed_read: &mut FramedRead<R, RequestDecoder>) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    match framed_read.next().await {
        Some(Ok(request)) => Ok(request),
        Some(Err(e)) => Err(e),
        None => Err(ParseError::UnexpectedEndOfStream),
    }
}

/// One HTTP exchange over a reader and a writer.
///
/// `HttpConnection` reads exactly one request, hands it to a [`Handler`] together
/// with a fresh [`ResponseWriter`], then closes the write half. There is no
/// keep-alive: every response closes the connection.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    writer: ResponseWriter<W>,
    read_timeout: Option<Duration>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_capacity(reader, writer, DEFAULT_READ_BUFFER_SIZE)
    }

    pub fn with_capacity(reader: R, writer: W, read_buffer_size: usize) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), read_buffer_size),
            writer: ResponseWriter::new(writer),
            read_timeout: None,
        }
    }

    /// Limits the time allowed to receive the complete request.
    ///
    /// `None`, the default, waits for the peer indefinitely.
    #[must_use]
    pub fn read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Reads the request, runs `handler`, and closes the connection.
    ///
    /// When the request can't be parsed and nothing has been written yet, a
    /// `400 Bad Request` naming the parse error is sent before closing.
    ///
    /// # Errors
    ///
    /// - [`HttpError::RequestError`] if the request could not be read
    /// - [`HttpError::ResponseError`] if the handler failed to write its response
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let result = match self.read_with_deadline().await {
            Ok(request) => {
                info!(method = %request.method(), request_target = request.target(), "receive request");
                handler.call(request, &mut self.writer).await.map_err(HttpError::from)
            }

            Err(e) => {
                error!(cause = %e, "can't receive request");
                if self.writer.state() == WriterState::Initial {
                    if let Err(send_error) = write_bad_request(&mut self.writer, &e).await {
                        warn!(cause = %send_error, "failed to send error response");
                    }
                }
                Err(e.into())
            }
        };

        let state = self.writer.state();
        if !matches!(state, WriterState::BodyWritten | WriterState::TrailersWritten) {
            debug!(state = ?state, "closing connection with an unfinished response");
        }

        if let Err(e) = self.writer.shutdown().await {
            debug!(cause = %e, "failed to shutdown connection");
        }

        result
    }

    async fn read_with_deadline(&mut self) -> Result<Request, ParseError> {
        match self.read_timeout {
            Some(read_timeout) => {
                tokio::time::timeout(read_timeout, next_request(&mut self.framed_read)).await.map_err(ParseError::io)?
            }
            None => next_request(&mut self.framed_read).await,
        }
    }
}

/// Best-effort `400 Bad Request` carrying the parse error as a plain text body.
async fn write_bad_request<W>(writer: &mut ResponseWriter<W>, error: &ParseError) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
{
    let body = format!("Error parsing request: {error}");
    writer.write_status_line(StatusCode::BAD_REQUEST).await?;
    writer.write_headers(&default_headers(body.len())).await?;
    writer.write_body(body.as_bytes()).await?;
    Ok(())
}
