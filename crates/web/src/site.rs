use async_trait::async_trait;
use bare_http::connection::ResponseWriter;
use bare_http::handler::Handler;
use bare_http::protocol::{Request, SendError};
use http::StatusCode;
use tokio::io::AsyncWrite;
use tracing::{info, warn};

use crate::pages::{BAD_REQUEST_PAGE, INTERNAL_SERVER_ERROR_PAGE, OK_PAGE, write_page};
use crate::router::{Route, RouteError, Router};
use crate::stream::write_stream;

/// The demo site handler.
#[derive(Debug)]
pub struct Site {
    router: Router,
}

impl Site {
    /// # Errors
    ///
    /// Returns [`RouteError::Insert`] if the route table can't be built.
    pub fn new() -> Result<Self, RouteError> {
        Ok(Self { router: Router::new()? })
    }
}

#[async_trait]
impl Handler for Site {
    async fn call<W>(&self, request: Request, writer: &mut ResponseWriter<W>) -> Result<(), SendError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let route = match self.router.resolve(request.target()) {
            Ok(route) => route,
            Err(e) => {
                warn!(request_target = request.target(), cause = %e, "can't route request");
                return write_page(writer, StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE).await;
            }
        };

        info!(method = %request.method(), request_target = request.target(), route = ?route, "dispatch request");
        match route {
            Route::YourProblem => write_page(writer, StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE).await,
            Route::MyProblem => write_page(writer, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_PAGE).await,
            Route::Stream { count } => write_stream(writer, count).await,
            Route::Index => write_page(writer, StatusCode::OK, OK_PAGE).await,
        }
    }
}
