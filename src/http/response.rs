// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

/// Response body as received from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Body decoded to text
    Text(String),
    /// Body with no textual Content-Type that is not valid UTF-8
    Binary(Bytes),
}

impl ResponseBody {
    /// Decode raw bytes, keeping them binary when they are not valid UTF-8
    pub fn from_bytes(bytes: Bytes) -> Self {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => ResponseBody::Text(text),
            Err(_) => ResponseBody::Binary(bytes),
        }
    }

    /// Text content, if textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) => Some(s),
            ResponseBody::Binary(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ResponseBody::Text(_))
    }

    /// Body length in bytes
    pub fn len(&self) -> usize {
        match self {
            ResponseBody::Text(s) => s.len(),
            ResponseBody::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Body as text, lossy conversion for binary
    pub fn text_lossy(&self) -> String {
        match self {
            ResponseBody::Text(s) => s.clone(),
            ResponseBody::Binary(b) => String::from_utf8_lossy(b).into_owned(),
        }
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        ResponseBody::Text(String::new())
    }
}

impl From<String> for ResponseBody {
    fn from(s: String) -> Self {
        ResponseBody::Text(s)
    }
}

impl From<&str> for ResponseBody {
    fn from(s: &str) -> Self {
        ResponseBody::Text(s.to_string())
    }
}

impl From<Bytes> for ResponseBody {
    fn from(b: Bytes) -> Self {
        ResponseBody::Binary(b)
    }
}

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: ResponseBody,
    /// Final URL (after redirects)
    pub url: Url,
    /// Whether this was a redirect
    pub redirected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: ResponseBody,
        url: Url,
        redirected: bool,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            redirected,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if status is server error (5xx). SOAP faults arrive as 500.
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body text, if textual
    pub fn text(&self) -> Option<&str> {
        self.body.as_text()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Check if content type is XML (SOAP 1.1 or 1.2)
    pub fn is_xml(&self) -> bool {
        self.content_type()
            .map(|ct| {
                ct.contains("text/xml")
                    || ct.contains("application/xml")
                    || ct.contains("application/soap+xml")
            })
            .unwrap_or(false)
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Replace the body, keeping status and metadata
    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response(body: ResponseBody) -> Response {
        Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            body,
            Url::parse("https://example.com").unwrap(),
            false,
            100,
        )
    }

    #[test]
    fn test_response_status() {
        let resp = response(ResponseBody::default());
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_response_text() {
        let resp = response("Hello, World!".into());
        assert_eq!(resp.text(), Some("Hello, World!"));

        let resp = response(Bytes::from_static(&[0xff, 0xfe]).into());
        assert_eq!(resp.text(), None);
        assert_eq!(resp.body.len(), 2);
    }

    #[test]
    fn test_body_from_bytes() {
        assert_eq!(
            ResponseBody::from_bytes(Bytes::from_static(b"<a/>")),
            ResponseBody::Text("<a/>".into())
        );
        assert!(!ResponseBody::from_bytes(Bytes::from_static(&[0xc3, 0x28])).is_text());
    }

    #[test]
    fn test_is_xml() {
        let mut resp = response(ResponseBody::default());
        assert!(!resp.is_xml());
        resp.headers.insert(
            "content-type",
            HeaderValue::from_static("text/xml; charset=utf-8"),
        );
        assert!(resp.is_xml());
    }
}
