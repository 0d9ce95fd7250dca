//! Ordered response writing.
//!
//! [`ResponseWriter`] serializes a response straight to the transport while
//! enforcing the section order:
//!
//! ```text
//! Initial -> StatusLineWritten -> HeadersWritten -> BodyWritten -> TrailersWritten
//! ```
//!
//! `write_body` and `write_chunked_body_done` both lead to `BodyWritten`, so the
//! plain and chunked paths converge before trailers become legal. Every operation
//! checks its predecessor state first and fails with
//! [`SendError::OutOfOrderWrite`] otherwise. The state advances only after the
//! bytes were written and flushed; a failed write leaves it where it was, with
//! whatever already reached the transport left as is.

use bytes::BytesMut;
use http::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;
use tracing::trace;

use crate::codec::{ChunkedEncoder, HeaderEncoder, StatusLineEncoder};
use crate::ensure;
use crate::protocol::{Headers, PayloadItem, SendError, WriterState};

/// Initial buffer size allocated for the status line and header sections
const INIT_BUFFER_SIZE: usize = 4 * 1024;

/// A response encoder bound to the output half of one connection.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    writer: W,
    buffer: BytesMut,
    state: WriterState,
    chunked_encoder: ChunkedEncoder,
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, INIT_BUFFER_SIZE)
    }

    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), state: WriterState::Initial, chunked_encoder: ChunkedEncoder::new() }
    }

    /// Returns the phase the response is in.
    #[inline]
    pub fn state(&self) -> WriterState {
        self.state
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes `HTTP/1.1 <code> <reason>\r\n`.
    ///
    /// # Errors
    ///
    /// [`SendError::OutOfOrderWrite`] unless the writer is in [`WriterState::Initial`].
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), SendError> {
        self.expect_state(WriterState::Initial, "write_status_line")?;

        StatusLineEncoder.encode(status, &mut self.buffer)?;
        self.flush_buffer().await?;

        self.advance(WriterState::StatusLineWritten);
        Ok(())
    }

    /// Writes every header as `name: value\r\n` followed by a blank line.
    ///
    /// # Errors
    ///
    /// [`SendError::OutOfOrderWrite`] unless the status line has been written.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), SendError> {
        self.expect_state(WriterState::StatusLineWritten, "write_headers")?;

        HeaderEncoder.encode(headers, &mut self.buffer)?;
        self.flush_buffer().await?;

        self.advance(WriterState::HeadersWritten);
        Ok(())
    }

    /// Writes `body` verbatim and returns the number of bytes written.
    ///
    /// The caller is responsible for having declared a matching `Content-Length`.
    ///
    /// # Errors
    ///
    /// [`SendError::OutOfOrderWrite`] unless the headers have been written.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, SendError> {
        self.expect_state(WriterState::HeadersWritten, "write_body")?;

        self.writer.write_all(body).await?;
        self.writer.flush().await?;

        self.advance(WriterState::BodyWritten);
        Ok(body.len())
    }

    /// Writes `body` as one chunk frame, `<hex-length>\r\n<bytes>\r\n`.
    ///
    /// Can be called any number of times while in [`WriterState::HeadersWritten`];
    /// it does not change the state.
    ///
    /// An empty `body` writes nothing and returns `Ok(0)`: encoding it would emit
    /// the `0\r\n` terminator early, which only [`write_chunked_body_done`] may do.
    ///
    /// [`write_chunked_body_done`]: Self::write_chunked_body_done
    ///
    /// # Errors
    ///
    /// [`SendError::OutOfOrderWrite`] unless the headers have been written and the
    /// body has not been finished yet.
    pub async fn write_chunked_body(&mut self, body: &[u8]) -> Result<usize, SendError> {
        self.expect_state(WriterState::HeadersWritten, "write_chunked_body")?;

        self.chunked_encoder.encode(PayloadItem::Chunk(body), &mut self.buffer)?;
        self.flush_buffer().await?;

        Ok(body.len())
    }

    /// Writes the terminal `0\r\n` chunk and moves to [`WriterState::BodyWritten`].
    ///
    /// # Errors
    ///
    /// [`SendError::OutOfOrderWrite`] unless the headers have been written.
    pub async fn write_chunked_body_done(&mut self) -> Result<(), SendError> {
        self.expect_state(WriterState::HeadersWritten, "write_chunked_body_done")?;

        self.chunked_encoder.encode(PayloadItem::<&[u8]>::Eof, &mut self.buffer)?;
        self.flush_buffer().await?;

        trace!(send_size = self.chunked_encoder.send_size(), "finished chunked body");
        self.advance(WriterState::BodyWritten);
        Ok(())
    }

    /// Writes the trailer section using the header line format, then a blank line.
    ///
    /// # Errors
    ///
    /// [`SendError::OutOfOrderWrite`] unless the body has been written.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), SendError> {
        self.expect_state(WriterState::BodyWritten, "write_trailers")?;

        HeaderEncoder.encode(trailers, &mut self.buffer)?;
        self.flush_buffer().await?;

        self.advance(WriterState::TrailersWritten);
        Ok(())
    }

    /// Shuts down the write half of the transport.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        Ok(self.writer.shutdown().await?)
    }

    fn expect_state(&self, expected: WriterState, operation: &'static str) -> Result<(), SendError> {
        ensure!(self.state == expected, SendError::out_of_order(operation, self.state));
        Ok(())
    }

    fn advance(&mut self, next: WriterState) {
        trace!(from = ?self.state, to = ?next, "response writer transition");
        self.state = next;
    }

    /// Sends the encoded bytes to the transport. The buffer is emptied either way,
    /// bytes that reached the transport cannot be taken back.
    async fn flush_buffer(&mut self) -> Result<(), SendError> {
        let result = self.writer.write_all(&self.buffer).await;
        self.buffer.clear();
        result?;

        Ok(self.writer.flush().await?)
    }
}
