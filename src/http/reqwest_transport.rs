// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Default transport backed by reqwest

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use async_trait::async_trait;
use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::config::TransportConfig;
use super::request::{Payload, RequestOptions};
use super::response::{Response, ResponseBody};
use super::transport::Transport;
use crate::error::{Error, Result};

/// Transport executing requests with reqwest
///
/// Two clients are kept because reqwest fixes the redirect policy per client:
/// one follows up to `max_redirects`, the other never follows.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    no_redirect_client: Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let client = Self::client_builder(&config)?
            .redirect(Policy::limited(config.max_redirects))
            .build()?;
        let no_redirect_client = Self::client_builder(&config)?
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            no_redirect_client,
            config,
        })
    }

    fn client_builder(config: &TransportConfig) -> Result<reqwest::ClientBuilder> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(builder)
    }

    /// Get transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Map request options onto a reqwest request
    fn prepare(&self, request: RequestOptions) -> reqwest::RequestBuilder {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };

        let mut builder = client.request(request.method, request.target);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        match request.body {
            Some(Payload::Text(text)) => builder = builder.body(text),
            Some(Payload::Binary(bytes)) => builder = builder.body(bytes),
            None => {}
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        for name in request.extra.keys() {
            tracing::debug!(option = %name, "Ignoring option not supported by reqwest transport");
        }

        builder
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Stream = ResponseStream;

    async fn execute(&self, request: RequestOptions) -> Result<Response> {
        let start = Instant::now();
        let requested_url = request.target.clone();

        let response = self.prepare(request).send().await?;

        let redirected = response.url() != &requested_url;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        let body = if is_textual(&headers) {
            ResponseBody::Text(response.text_with_charset("utf-8").await?)
        } else {
            ResponseBody::from_bytes(response.bytes().await?)
        };
        let response_time = start.elapsed().as_millis() as u64;

        tracing::debug!(
            status = status.as_u16(),
            url = %final_url,
            bytes = body.len(),
            elapsed_ms = response_time,
            "Http response received"
        );

        Ok(Response::new(
            status,
            headers,
            body,
            final_url,
            redirected,
            response_time,
        ))
    }

    fn open_stream(&self, request: RequestOptions) -> Self::Stream {
        let pending = self.prepare(request).send();
        ResponseStream {
            inner: Box::pin(async move { pending.await.map_err(Error::from) }),
        }
    }
}

/// Whether the Content-Type names a charset or a text/XML media type.
/// Such bodies are decoded as text with the declared charset (UTF-8 when none
/// is given); anything else is text only when it is valid UTF-8.
fn is_textual(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let content_type = content_type.to_ascii_lowercase();
    let mut parts = content_type.split(';').map(str::trim);
    let essence = parts.next().unwrap_or_default();

    parts.any(|param| param.starts_with("charset="))
        || essence.starts_with("text/")
        || essence.ends_with("/xml")
        || essence.ends_with("+xml")
}

/// Stream handle for a request started with [`ReqwestTransport::open_stream`]
///
/// Resolves to the raw `reqwest::Response` once headers arrive; read the body
/// with `Response::chunk`. Dropping the handle cancels the request.
pub struct ResponseStream {
    inner: BoxFuture<'static, Result<reqwest::Response>>,
}

impl Future for ResponseStream {
    type Output = Result<reqwest::Response>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl std::fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new().unwrap();
        assert_eq!(transport.config().max_redirects, 10);
    }

    fn content_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_is_textual() {
        assert!(is_textual(&content_type("text/xml; charset=ISO-8859-1")));
        assert!(is_textual(&content_type("application/soap+xml")));
        assert!(is_textual(&content_type("Application/XML")));
        assert!(is_textual(&content_type("text/html")));
        assert!(is_textual(&content_type("multipart/related; charset=utf-8; type=\"text/xml\"")));

        assert!(!is_textual(&content_type("application/octet-stream")));
        assert!(!is_textual(&content_type("multipart/related; boundary=x")));
        assert!(!is_textual(&HeaderMap::new()));
    }

    #[test]
    fn test_invalid_proxy() {
        let result = ReqwestTransport::with_config(TransportConfig::new().proxy("http://[::1"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
