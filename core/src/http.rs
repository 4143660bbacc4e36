//! HTTP messages described as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and parses `HttpResponse` values;
//! a [`Transport`](crate::transport::Transport) sits between the two and does
//! the actual I/O. Every field is owned, so `clone()` is a deep copy: a
//! decorator can change the headers of its clone without the caller's
//! request ever seeing it.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An outbound HTTP request.
///
/// `url` is absolute. Header names are compared case-insensitively by the
/// lookup helpers, but stored exactly as they were set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First value of the header `name`, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Replace every existing `name` header with a single `name: value`.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }
}

/// An HTTP response as returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: "https://example.com/".to_string(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: None,
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = request();
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn set_header_replaces_existing_values() {
        let mut req = request();
        req.headers.push(("x-token".to_string(), "old".to_string()));
        req.headers.push(("X-Token".to_string(), "older".to_string()));
        req.set_header("X-Token", "new");

        let tokens: Vec<_> = req
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("x-token"))
            .collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(req.header("x-token"), Some("new"));
        assert_eq!(req.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn clone_owns_its_headers() {
        let original = request();
        let mut copy = original.clone();
        copy.set_header("Content-Type", "application/json");
        assert_eq!(original.header("content-type"), Some("text/plain"));
    }

    #[test]
    fn success_range() {
        let mut res = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(res.is_success());
        res.status = 401;
        assert!(!res.is_success());
    }
}
