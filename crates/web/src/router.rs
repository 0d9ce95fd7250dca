use matchit::InsertError;
use thiserror::Error;
use tracing::trace;

/// Upper bound on the frames `/stream/{count}` will produce
pub const MAX_STREAM_FRAMES: usize = 100;

/// What a request target resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    YourProblem,
    MyProblem,
    Stream { count: usize },
    Index,
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("failed to register route: {source}")]
    Insert {
        #[from]
        source: InsertError,
    },

    #[error("invalid stream frame count: {count:?}")]
    InvalidCount { count: String },
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    YourProblem,
    MyProblem,
    Stream,
}

/// Maps request targets to [`Route`]s.
#[derive(Debug)]
pub struct Router {
    inner_router: matchit::Router<Endpoint>,
}

impl Router {
    /// # Errors
    ///
    /// Returns [`RouteError::Insert`] if a route pattern is rejected by the matcher.
    pub fn new() -> Result<Self, RouteError> {
        let mut inner_router = matchit::Router::new();
        inner_router.insert("/yourproblem", Endpoint::YourProblem)?;
        inner_router.insert("/myproblem", Endpoint::MyProblem)?;
        inner_router.insert("/stream/{count}", Endpoint::Stream)?;
        Ok(Self { inner_router })
    }

    /// Resolves `target`, ignoring any query string.
    ///
    /// Unknown paths resolve to [`Route::Index`]. The stream frame count is
    /// capped at [`MAX_STREAM_FRAMES`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidCount`] when the stream count isn't a number.
    pub fn resolve(&self, target: &str) -> Result<Route, RouteError> {
        let path = target.split_once('?').map_or(target, |(path, _query)| path);

        let matched = match self.inner_router.at(path) {
            Ok(matched) => matched,
            Err(e) => {
                trace!(path, cause = %e, "no route matched, fall back to index");
                return Ok(Route::Index);
            }
        };

        let route = match matched.value {
            Endpoint::YourProblem => Route::YourProblem,
            Endpoint::MyProblem => Route::MyProblem,
            Endpoint::Stream => {
                let raw = matched.params.get("count").unwrap_or_default();
                let count = raw.parse::<usize>().map_err(|_| RouteError::InvalidCount { count: raw.to_string() })?;
                Route::Stream { count: count.min(MAX_STREAM_FRAMES) }
            }
        };

        Ok(route)
    }
}
