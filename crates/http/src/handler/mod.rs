//! The application callback invoked once per connection.

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::connection::ResponseWriter;
use crate::protocol::{Request, SendError};

/// Application logic run with a completed request.
///
/// The handler is solely responsible for driving the [`ResponseWriter`] through a
/// valid sequence. Nothing is repaired afterwards: if the writer is left in a
/// non-terminal state, the bytes already written stand and the connection is
/// closed.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call<W>(&self, request: Request, writer: &mut ResponseWriter<W>) -> Result<(), SendError>
    where
        W: AsyncWrite + Unpin + Send;
}
