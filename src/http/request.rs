// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types and builder
//!
//! [`RequestBuilder::build`] turns a target URL, an optional payload and the
//! caller's overrides into a fully specified [`RequestOptions`]. It performs no
//! I/O.

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use serde_json::{json, Value};
use url::Url;

use super::headers::Headers;
use super::options::OptionOverrides;
use super::{default_headers, names, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};

/// Request payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Textual payload, sent as UTF-8
    Text(String),
    /// Binary payload, sent as-is
    Binary(Bytes),
}

impl Payload {
    /// Payload size in bytes (UTF-8 length for text)
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(s) => s.len(),
            Payload::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<Bytes> for Payload {
    fn from(b: Bytes) -> Self {
        Payload::Binary(b)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(b: Vec<u8>) -> Self {
        Payload::Binary(Bytes::from(b))
    }
}

/// Fully specified outbound request, handed to the transport
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Parsed target URL
    pub target: Url,
    /// Request method
    pub method: Method,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<Payload>,
    /// Follow redirects
    pub follow_redirects: bool,
    /// Per-request timeout, transport default when unset
    pub timeout: Option<Duration>,
    /// Transport-specific options with no dedicated field
    pub extra: BTreeMap<String, Value>,
}

impl RequestOptions {
    /// URL scheme
    pub fn scheme(&self) -> &str {
        self.target.scheme()
    }

    /// Host name
    pub fn host(&self) -> Option<&str> {
        self.target.host_str()
    }

    /// Port of the parsed URL; `None` for the scheme's default port even when
    /// the URL spelled it out
    pub fn port(&self) -> Option<u16> {
        self.target.port()
    }

    /// Whether the target uses TLS
    pub fn is_secure(&self) -> bool {
        self.target.scheme() == "https"
    }

    /// Pathname, query and fragment concatenated
    pub fn path(&self) -> String {
        let mut path = match self.target.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        if let Some(query) = self.target.query() {
            path.push('?');
            path.push_str(query);
        }
        if let Some(fragment) = self.target.fragment() {
            path.push('#');
            path.push_str(fragment);
        }
        path
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.target.as_str()
    }

    /// JSON rendering for debug logging; binary bodies are summarized
    pub fn to_json(&self) -> Value {
        let body = match &self.body {
            None => Value::Null,
            Some(Payload::Text(s)) => Value::String(s.clone()),
            Some(Payload::Binary(b)) => Value::String(format!("<{} bytes>", b.len())),
        };
        let mut value = json!({
            "target": self.target.as_str(),
            "method": self.method.as_str(),
            "headers": self.headers.to_json(),
            "body": body,
            "followRedirects": self.follow_redirects,
        });
        if let Value::Object(map) = &mut value {
            if let Some(timeout) = self.timeout {
                map.insert("timeout".into(), json!(timeout.as_millis() as u64));
            }
            for (name, extra) in &self.extra {
                map.insert(name.clone(), extra.clone());
            }
        }
        value
    }
}

/// Builds [`RequestOptions`] from a URL, payload and overrides
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    user_agent: String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl RequestBuilder {
    /// Create a builder sending the given User-Agent
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Build the request options
    ///
    /// The method is POST when a payload is given and GET otherwise. Header
    /// overrides win over the defaults; option overrides are applied last
    /// according to [`super::options::merge_rule`].
    pub fn build(
        &self,
        url: &str,
        payload: Option<Payload>,
        header_overrides: &Headers,
        option_overrides: &OptionOverrides,
    ) -> Result<RequestOptions> {
        let target = Url::parse(url).map_err(|e| Error::invalid_url(url, e.to_string()))?;
        let host = target
            .host_str()
            .ok_or_else(|| Error::invalid_url(url, "URL has no host"))?;
        // `Url` drops a port equal to the scheme default, the raw authority keeps it
        let host = match explicit_port(url).or(target.port()) {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let method = if payload.is_some() {
            Method::POST
        } else {
            Method::GET
        };

        let mut headers = default_headers(&self.user_agent, &host);
        if let Some(Payload::Text(text)) = &payload {
            headers.insert(names::CONTENT_LENGTH, text.len().to_string());
            headers.insert(names::CONTENT_TYPE, super::FORM_URLENCODED);
        }
        headers.merge(header_overrides);

        let mut options = RequestOptions {
            target,
            method,
            headers,
            body: payload,
            follow_redirects: true,
            timeout: None,
            extra: BTreeMap::new(),
        };
        option_overrides.apply_to(&mut options)?;

        tracing::debug!(request = %options.to_json(), "Http request");
        Ok(options)
    }
}

/// Port written in the authority of `url`, default ports included
fn explicit_port(url: &str) -> Option<u16> {
    let rest = url.trim().split_once("://")?.1;
    let authority = rest.split(|c| matches!(c, '/' | '?' | '#')).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let port = match host_port.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once(']')?.1.strip_prefix(':')?,
        None => host_port.rsplit_once(':')?.1,
    };
    port.parse().ok()
}
