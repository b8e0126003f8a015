use std::ops::ControlFlow;

use chrono::Local;
use tracing::info;

use super::Stage;
use crate::request::Request;
use crate::response::Response;

/// Access log: one `info` event per request with the local time, method and
/// path. Never halts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger;

impl Stage for Logger {
    fn intercept(&self, req: &mut Request) -> ControlFlow<Response> {
        info!(
            target: "roster::access",
            at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
            method = %req.method(),
            uri = %req.uri(),
            "request received",
        );
        ControlFlow::Continue(())
    }
}
