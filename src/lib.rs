//! # roster
//!
//! A small HTTP service over an in-memory collection of user records, built
//! on a minimal hyper-based framework with a composable middleware chain.
//!
//! ## Request path
//!
//! ```text
//! Logger ─▶ Authenticate ─▶ [Authorize(role)] ─▶ handler ─▶ ListQuery / UserStore
//! ```
//!
//! Each [`middleware::Stage`] may halt with a response (401, 403) or let the
//! request through. Handlers read and mutate a [`users::UserStore`] injected
//! when the routes are built, never a global.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use roster::middleware::AuthConfig;
//! use roster::users::{self, MemoryStore};
//! use roster::Server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = users::routes(MemoryStore::seeded().shared(), AuthConfig::new("mysecrettoken"));
//!     Server::bind("127.0.0.1:5000".parse().unwrap()).serve(app).await.unwrap();
//! }
//! ```
//!
//! ```bash
//! curl -H 'authenticate: Bearer mysecrettoken' \
//!      'http://localhost:5000/api/users?city=Addis%20Ababa&sort=age'
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod middleware;
pub mod static_files;
pub mod telemetry;
pub mod users;

pub use error::{ApiError, Error};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
