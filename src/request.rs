//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;

/// An incoming HTTP request with its body fully collected.
///
/// Stages receive it as `&mut Request` and may attach typed values through
/// [`extensions_mut`](Request::extensions_mut); handlers receive it by value.
pub struct Request {
    parts: http::request::Parts,
    body: Bytes,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl Request {
    /// Wraps an `http::Request` whose body has already been read.
    ///
    /// The query string is decoded once here. When a key repeats, the first
    /// value wins.
    pub fn from_http(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        let mut query = HashMap::new();
        if let Some(raw) = parts.uri.query() {
            for (k, v) in url::form_urlencoded::parse(raw.as_bytes()) {
                query.entry(k.into_owned()).or_insert_with(|| v.into_owned());
            }
        }
        Self { parts, body, params: HashMap::new(), query }
    }

    pub fn method(&self) -> &http::Method { &self.parts.method }
    pub fn uri(&self) -> &http::Uri { &self.parts.uri }
    pub fn path(&self) -> &str { self.parts.uri.path() }
    pub fn headers(&self) -> &http::HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Header lookup. Values that are not visible ASCII read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/api/users/{id}`, `req.param("id")` on `/api/users/42`
    /// returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a decoded query parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn extensions(&self) -> &http::Extensions { &self.parts.extensions }
    pub fn extensions_mut(&mut self) -> &mut http::Extensions { &mut self.parts.extensions }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(uri: &str) -> Request {
        let req = http::Request::builder()
            .uri(uri)
            .header("Authenticate", "Bearer t")
            .body(Bytes::new())
            .unwrap();
        Request::from_http(req)
    }

    #[test]
    fn decodes_query_parameters() {
        let req = get("/api/users?city=Addis%20Ababa&sort=age&minAge=+20");
        assert_eq!(req.query("city"), Some("Addis Ababa"));
        assert_eq!(req.query("sort"), Some("age"));
        assert_eq!(req.query("minAge"), Some(" 20"));
        assert_eq!(req.query("maxAge"), None);
        assert_eq!(req.path(), "/api/users");
    }

    #[test]
    fn first_repeated_query_value_wins() {
        let req = get("/api/users?city=Seoul&city=Paris");
        assert_eq!(req.query("city"), Some("Seoul"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = get("/");
        assert_eq!(req.header("authenticate"), Some("Bearer t"));
    }
}
