//! Radix-tree request router with middleware stages.
//!
//! One tree per HTTP method, O(path-length) lookup. A request goes through:
//!
//! ```text
//! router-wide stages ─▶ route lookup ─▶ route stages ─▶ handler
//!                             │
//!                             └─ no match ─▶ fallback (default: 404)
//! ```
//!
//! Any stage may halt; its response is then the only one produced.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Chain, Stage};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

struct Route {
    stages: Chain,
    handler: BoxedHandler,
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Every builder method returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Arc<Route>>>,
    stages: Chain,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), stages: Chain::new(), fallback: None }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves
    /// them. Static segments win over parameters, so `/api/users/admin-only`
    /// and `/api/users/{id}` can coexist.
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or conflicts with an existing route.
    /// Routes are fixed at startup, so this is a programming error.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.on_with(method, path, Chain::new(), handler)
    }

    /// Like [`on`](Router::on), with stages that run only for this route,
    /// after the router-wide ones.
    pub fn on_with(mut self, method: Method, path: &str, stages: Chain, handler: impl Handler) -> Self {
        let route = Arc::new(Route { stages, handler: handler.into_boxed_handler() });
        self.routes
            .entry(method)
            .or_default()
            .insert(path, route)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Append a stage that runs for every request, before route lookup.
    pub fn stage(mut self, stage: impl Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Handler for requests that match no route. Without one they get a
    /// bare `404 Not Found`.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    /// Runs one request through the stages and the matched handler.
    ///
    /// The server calls this for every request; tests can call it directly.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let mut req = Request::from_http(req);

        if let ControlFlow::Break(res) = self.stages.run(&mut req) {
            return res;
        }

        let Ok(method) = Method::try_from(req.method()) else {
            return Response::status(Status::MethodNotAllowed);
        };

        match self.lookup(method, req.path()) {
            Some((route, params)) => {
                req.set_params(params);
                if let ControlFlow::Break(res) = route.stages.run(&mut req) {
                    return res;
                }
                route.handler.call(req).await
            }
            None => match &self.fallback {
                Some(handler) => handler.call(req).await,
                None => Response::status(Status::NotFound),
            },
        }
    }

    fn lookup(&self, method: Method, path: &str) -> Option<(Arc<Route>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let route = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((route, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
