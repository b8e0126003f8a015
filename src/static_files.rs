//! Static file serving with a custom 404 page.
//!
//! [`site`] builds the whole static variant: an access log stage in front of
//! a [`StaticFiles`] fallback. `GET /` and directory paths serve
//! `index.html`; misses answer `404` with `<root>/404.html`.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::handler::Handler;
use crate::middleware::Logger;
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::router::Router;
use crate::status::Status;

const INDEX: &str = "index.html";
const NOT_FOUND_PAGE: &str = "404.html";

/// The static-site router rooted at `root`.
pub fn site(root: impl Into<PathBuf>) -> Router {
    Router::new()
        .stage(Logger)
        .fallback(StaticFiles::new(root).into_handler())
}

/// Serves files below a root directory.
#[derive(Clone, Debug)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Wraps `self` as a router handler, usually the fallback.
    pub fn into_handler(self) -> impl Handler {
        move |req: Request| {
            let files = self.clone();
            async move { files.serve(&req).await }
        }
    }

    /// Answers one request: the file, or the 404 page.
    pub async fn serve(&self, req: &Request) -> Response {
        let method = req.method();
        let readable = *method == http::Method::GET || *method == http::Method::HEAD;
        if readable {
            match self.load(req.path()).await {
                Ok((body, content_type)) => {
                    return Response::builder().bytes(content_type, body);
                }
                Err(e) => debug!(path = %req.path(), "static miss: {e}"),
            }
        }
        self.not_found().await
    }

    /// Reads the file behind `url_path` and picks its content type.
    pub async fn load(&self, url_path: &str) -> io::Result<(Vec<u8>, ContentType)> {
        let mut path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path escapes the root"))?;

        if tokio::fs::metadata(&path).await?.is_dir() {
            path.push(INDEX);
        }
        let body = tokio::fs::read(&path).await?;
        Ok((body, content_type(&path)))
    }

    async fn not_found(&self) -> Response {
        let page = tokio::fs::read(self.root.join(NOT_FOUND_PAGE)).await;
        let res = Response::builder().status(Status::NotFound);
        match page {
            Ok(body) => res.bytes(ContentType::Html, body),
            Err(_) => res.text("Not Found"),
        }
    }

    /// Joins `url_path` under the root. Only plain segments are allowed, so
    /// `..` or an absolute component can never leave the root.
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => path.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(path)
    }
}

fn content_type(path: &Path) -> ContentType {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => ContentType::Html,
        "css" => ContentType::Css,
        "js" | "mjs" => ContentType::Javascript,
        "json" => ContentType::Json,
        "png" => ContentType::Png,
        "svg" => ContentType::Svg,
        "txt" => ContentType::Text,
        _ => ContentType::OctetStream,
    }
}
