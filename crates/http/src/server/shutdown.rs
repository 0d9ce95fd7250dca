use tokio_util::sync::CancellationToken;

/// Cloneable handle asking a [`Server`](crate::server::Server) to stop accepting.
///
/// One handle may be shared by several servers; a single `shutdown` stops all of
/// them. The closed state is what lets the accept loop tell an intentional close
/// from a genuine accept failure.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    token: CancellationToken,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. Calling it more than once has no further effect.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes once shutdown was requested, immediately if it already was.
    pub(crate) async fn notified(&self) {
        self.token.cancelled().await;
    }
}
