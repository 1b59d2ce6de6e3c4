// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client facade
//!
//! Builds the request, hands it to the transport and normalizes the body of the
//! response before it goes back to the caller.

use std::sync::Arc;

use super::config::HttpClientConfig;
use super::headers::Headers;
use super::normalize::ResponseNormalizer;
use super::options::OptionOverrides;
use super::request::{Payload, RequestBuilder, RequestOptions};
use super::response::Response;
use super::reqwest_transport::ReqwestTransport;
use super::transport::Transport;
use crate::error::Result;

/// HTTP client used by SOAP clients
pub struct HttpClient<T: Transport = ReqwestTransport> {
    transport: Arc<T>,
    builder: RequestBuilder,
    normalizer: ResponseNormalizer,
}

impl HttpClient<ReqwestTransport> {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(config.transport.clone())?;
        Ok(Self::with_transport_and_config(transport, config))
    }
}

impl<T: Transport> HttpClient<T> {
    /// Create a client around an injected transport
    pub fn with_transport(transport: T) -> Self {
        Self::with_transport_and_config(transport, HttpClientConfig::default())
    }

    /// Create a client around an injected transport with custom configuration.
    /// `config.transport` is not used; the transport is already configured.
    pub fn with_transport_and_config(transport: T, config: HttpClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            builder: RequestBuilder::new(config.user_agent),
            normalizer: config.normalizer,
        }
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the response normalizer
    pub fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }

    /// Build the request options without sending anything
    pub fn build_request(
        &self,
        url: &str,
        payload: Option<Payload>,
        headers: &Headers,
        options: &OptionOverrides,
    ) -> Result<RequestOptions> {
        self.builder.build(url, payload, headers, options)
    }

    /// Execute a request and normalize the response body
    ///
    /// Transport errors are returned unchanged; the body is only normalized on
    /// success.
    pub async fn request(
        &self,
        url: &str,
        payload: Option<Payload>,
        headers: &Headers,
        options: &OptionOverrides,
    ) -> Result<Response> {
        let request = self.build_request(url, payload, headers, options)?;
        self.execute(request).await
    }

    /// Execute a request and report the outcome to `on_complete`
    ///
    /// Request construction errors are returned directly and `on_complete` is
    /// not called. Otherwise `on_complete` is called exactly once, with either
    /// the transport error or the response carrying the normalized body.
    pub async fn send<F>(
        &self,
        url: &str,
        payload: Option<Payload>,
        headers: &Headers,
        options: &OptionOverrides,
        on_complete: F,
    ) -> Result<()>
    where
        F: FnOnce(Result<Response>) + Send,
    {
        let request = self.build_request(url, payload, headers, options)?;
        on_complete(self.execute(request).await);
        Ok(())
    }

    /// Execute built options; the normalizer only runs on success
    async fn execute(&self, request: RequestOptions) -> Result<Response> {
        let url = request.target.clone();
        let mut response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, url = %url, "Transport failed");
                return Err(e);
            }
        };
        let body = std::mem::take(&mut response.body);
        Ok(response.with_body(self.normalizer.normalize(body)))
    }

    /// Start a request and return the transport's stream handle
    ///
    /// The response body is not normalized; streaming callers apply
    /// [`ResponseNormalizer`] themselves once the full body is available.
    pub fn request_stream(
        &self,
        url: &str,
        payload: Option<Payload>,
        headers: &Headers,
        options: &OptionOverrides,
    ) -> Result<T::Stream> {
        let request = self.build_request(url, payload, headers, options)?;
        Ok(self.transport.open_stream(request))
    }
}

impl<T: Transport> Clone for HttpClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            builder: self.builder.clone(),
            normalizer: self.normalizer,
        }
    }
}
