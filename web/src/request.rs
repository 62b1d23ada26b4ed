//! Inbound request abstraction
//!
//! The helpers only need header lookup, header-name enumeration, the
//! multi-valued parameter map and the transport peer address. Both
//! `http::Request` (as handed out by axum) and a plain [`RawRequest`]
//! provide them.

use axum::extract::ConnectInfo;
use axum::http::Request;
use std::borrow::Cow;
use std::net::SocketAddr;

/// Peer address reported when the transport did not record one
pub const UNKNOWN_PEER: &str = "unknown";

pub trait InboundRequest {
    /// First value of a header, matched case-insensitively
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Distinct header names, in the casing the request reports them
    fn header_names(&self) -> Vec<&str>;

    /// Parameters with every value of a repeated key, keys in first-appearance order
    fn parameter_map(&self) -> Vec<(String, Vec<String>)>;

    /// Transport-level peer address
    fn remote_addr(&self) -> String;
}

impl<B> InboundRequest for Request<B> {
    /// Non-UTF-8 bytes are replaced rather than dropping the header.
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers()
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    /// `http::HeaderMap` stores names lowercase.
    fn header_names(&self) -> Vec<&str> {
        self.headers().keys().map(|k| k.as_str()).collect()
    }

    fn parameter_map(&self) -> Vec<(String, Vec<String>)> {
        match self.uri().query() {
            Some(query) => parse_query(query),
            None => Vec::new(),
        }
    }

    fn remote_addr(&self) -> String {
        self.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_PEER.to_string())
    }
}

/// Request assembled by hand, keeping header names exactly as sent
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub peer_addr: Option<SocketAddr>,
}

impl RawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Append every pair of an `a=1&b=2` query string
    pub fn with_query(mut self, query: &str) -> Self {
        self.params.extend(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
        self
    }

    pub fn with_peer(mut self, addr: SocketAddr) -> Self {
        self.peer_addr = Some(addr);
        self
    }
}

impl InboundRequest for RawRequest {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| Cow::Borrowed(v.as_str()))
    }

    fn header_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (k, _) in &self.headers {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(k)) {
                names.push(k.as_str());
            }
        }
        names
    }

    fn parameter_map(&self) -> Vec<(String, Vec<String>)> {
        group(self.params.iter().cloned())
    }

    fn remote_addr(&self) -> String {
        self.peer_addr
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_PEER.to_string())
    }
}

fn parse_query(query: &str) -> Vec<(String, Vec<String>)> {
    group(url::form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())))
}

fn group(pairs: impl Iterator<Item = (String, String)>) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in pairs {
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => grouped.push((key, vec![value])),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;

    #[test]
    fn test_http_request_headers() {
        let req = Request::builder()
            .uri("/")
            .header("X-Token", "abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(req.header("x-token").as_deref(), Some("abc"));
        assert_eq!(req.header("X-TOKEN").as_deref(), Some("abc"));
        assert_eq!(req.header_names(), vec!["x-token"]);
    }

    #[test]
    fn test_http_request_utf8_header_value() {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        req.headers_mut().insert(
            "x-filename",
            HeaderValue::from_bytes("José.txt".as_bytes()).unwrap(),
        );
        req.headers_mut()
            .insert("x-raw", HeaderValue::from_bytes(&[b'a', 0xFF]).unwrap());
        assert_eq!(req.header("X-Filename").as_deref(), Some("José.txt"));
        assert_eq!(req.header("x-raw").as_deref(), Some("a\u{FFFD}"));
    }

    #[test]
    fn test_http_request_query_params() {
        let req = Request::builder()
            .uri("/search?q=1&page=2&q=2&msg=hello%20world")
            .body(Body::empty())
            .unwrap();
        let params = req.parameter_map();
        assert_eq!(params[0], ("q".to_string(), vec!["1".to_string(), "2".to_string()]));
        assert_eq!(params[1], ("page".to_string(), vec!["2".to_string()]));
        assert_eq!(params[2].1, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_http_request_peer() {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(req.remote_addr(), UNKNOWN_PEER);

        let addr: SocketAddr = "10.1.2.3:5555".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(req.remote_addr(), "10.1.2.3");
    }

    #[test]
    fn test_raw_request_keeps_casing_and_dedups() {
        let req = RawRequest::new()
            .with_header("X-Custom-Token", "a")
            .with_header("x-custom-token", "b")
            .with_header("Accept", "*/*");
        assert_eq!(req.header_names(), vec!["X-Custom-Token", "Accept"]);
        assert_eq!(req.header("X-CUSTOM-TOKEN").as_deref(), Some("a"));
    }

    #[test]
    fn test_raw_request_query() {
        let req = RawRequest::new().with_query("a=1&b=2&a=3");
        let params = req.parameter_map();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].1, vec!["1".to_string(), "3".to_string()]);
    }
}
