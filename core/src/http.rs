//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network. The caller (host) executes the actual I/O and
//! reports connection-level problems back as `TransportError`.
//!
//! All fields use owned types (`String`, `Vec`) so values can be handed to any
//! transport without lifetime concerns.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `TwitterClient::build_*` methods. `path` is the absolute URL
/// without a query string; `query` keeps the parameters in the order the
/// builder emitted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Absolute URL with the form-url-encoded query appended.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{query}", self.path)
    }

    /// Value of the first query parameter called `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `TwitterClient::parse_*` methods for decoding.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A request that never produced a response: connection reset, timeout,
/// TLS failure. The cause is opaque to this crate and passed through as-is.
#[derive(Debug, Clone)]
pub struct TransportError {
    cause: Arc<dyn Error + Send + Sync>,
}

impl TransportError {
    pub fn new(cause: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            cause: Arc::from(cause.into()),
        }
    }

    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failure: {}", self.cause)
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: Vec<(&str, &str)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "https://api.twitter.com/2/tweets".to_string(),
            query: query
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn url_without_query_has_no_question_mark() {
        assert_eq!(request(vec![]).url(), "https://api.twitter.com/2/tweets");
    }

    #[test]
    fn url_encodes_query_in_order() {
        let req = request(vec![("ids", "1,2"), ("tweet.fields", "id,text")]);
        assert_eq!(
            req.url(),
            "https://api.twitter.com/2/tweets?ids=1%2C2&tweet.fields=id%2Ctext"
        );
    }

    #[test]
    fn query_param_finds_first_match() {
        let req = request(vec![("expansions", "author_id")]);
        assert_eq!(req.query_param("expansions"), Some("author_id"));
        assert_eq!(req.query_param("user.fields"), None);
    }

    #[test]
    fn transport_error_exposes_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = TransportError::new(io);
        assert_eq!(err.to_string(), "transport failure: reset by peer");
        assert!(err.source().is_some());
        assert_eq!(err.cause().to_string(), "reset by peer");
    }
}
