//! A small demo site served by `bare-http`
//!
//! [`Site`] is a [`bare_http::handler::Handler`] that routes on the request
//! target:
//!
//! - `/yourproblem`: `400 Bad Request` HTML page
//! - `/myproblem`: `500 Internal Server Error` HTML page
//! - `/stream/{count}`: a chunked body of `count` text frames, followed by the
//!   `X-Content-SHA256` and `X-Content-Length` trailers
//! - anything else: `200 OK` HTML page
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bare_http::server::Server;
//! use bare_web::Site;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = Server::builder().address("127.0.0.1:42069").bind().await?;
//! server.serve(Arc::new(Site::new()?)).await;
//! # Ok(())
//! # }
//! ```

mod pages;
mod router;
mod site;
mod stream;

pub use pages::{BAD_REQUEST_PAGE, INTERNAL_SERVER_ERROR_PAGE, OK_PAGE, write_page};
pub use router::{MAX_STREAM_FRAMES, Route, RouteError, Router};
pub use site::Site;
pub use stream::write_stream;
