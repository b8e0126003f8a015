//! Middleware stages.
//!
//! A [`Stage`] sees the request before its handler does and either lets it
//! through or answers it. Stages compose into a [`Chain`] that runs them in
//! registration order; the first stage to halt produces the only response
//! sent, and neither later stages nor the handler run.
//!
//! ```rust
//! use roster::middleware::{AuthConfig, Authenticate, Authorize, Chain, Logger, Role};
//!
//! let auth = AuthConfig::new("s3cret");
//! let chain = Chain::new()
//!     .stage(Logger)
//!     .stage(Authenticate::new(auth))
//!     .stage(Authorize::role(Role::Admin));
//! assert_eq!(chain.len(), 3);
//! ```
//!
//! The [`Router`](crate::Router) owns two chains: one it runs for every
//! request before route lookup, and one per route that runs after lookup.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

mod auth;
mod logger;

pub use auth::{AuthConfig, Authenticate, Authorize, Principal, Role, UnknownRole};
pub use logger::Logger;

/// One step of a middleware chain.
///
/// Return `ControlFlow::Continue(())` to hand the request on, or
/// `ControlFlow::Break(response)` to halt with that response.
pub trait Stage: Send + Sync + 'static {
    fn intercept(&self, req: &mut Request) -> ControlFlow<Response>;
}

/// Adapts a closure into a [`Stage`].
///
/// ```rust
/// use std::ops::ControlFlow;
/// use roster::middleware::{stage_fn, Chain};
/// use roster::{Response, Status};
///
/// let chain = Chain::new().stage(stage_fn(|req| {
///     if req.header("x-maintenance").is_some() {
///         ControlFlow::Break(Response::status(Status::Forbidden))
///     } else {
///         ControlFlow::Continue(())
///     }
/// }));
/// ```
pub fn stage_fn<F>(f: F) -> FnStage<F>
where
    F: Fn(&mut Request) -> ControlFlow<Response> + Send + Sync + 'static,
{
    FnStage(f)
}

/// A [`Stage`] built from a closure by [`stage_fn`].
pub struct FnStage<F>(F);

impl<F> Stage for FnStage<F>
where
    F: Fn(&mut Request) -> ControlFlow<Response> + Send + Sync + 'static,
{
    fn intercept(&self, req: &mut Request) -> ControlFlow<Response> {
        (self.0)(req)
    }
}

/// An ordered list of stages.
///
/// Cloning is cheap: stages are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct Chain {
    stages: Vec<Arc<dyn Stage>>,
}

impl Chain {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage. Returns `self` for chaining.
    pub fn stage(mut self, stage: impl Stage) -> Self {
        self.push(stage);
        self
    }

    pub fn push(&mut self, stage: impl Stage) {
        self.stages.push(Arc::new(stage));
    }

    pub fn len(&self) -> usize { self.stages.len() }
    pub fn is_empty(&self) -> bool { self.stages.is_empty() }

    /// Runs every stage in order, stopping at the first halt.
    pub fn run(&self, req: &mut Request) -> ControlFlow<Response> {
        self.stages.iter().try_for_each(|stage| stage.intercept(req))
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("stages", &self.stages.len()).finish()
    }
}
