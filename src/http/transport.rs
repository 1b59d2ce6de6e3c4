// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport capability consumed by [`super::HttpClient`]
//!
//! The transport owns all network I/O: sockets, TLS, redirects, timeouts.
//! Implementations receive fully built [`RequestOptions`] and hand back the raw,
//! unnormalized response.
//!
//! # Example
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use soap_http::http::{RequestOptions, Response, ResponseBody, Transport};
//! use soap_http::Result;
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl Transport for Canned {
//!     type Stream = ResponseBody;
//!
//!     async fn execute(&self, request: RequestOptions) -> Result<Response> {
//!         Ok(Response::new(
//!             reqwest::StatusCode::OK,
//!             Default::default(),
//!             "<s:Envelope/></s:Envelope>".into(),
//!             request.target,
//!             false,
//!             0,
//!         ))
//!     }
//!
//!     fn open_stream(&self, _request: RequestOptions) -> Self::Stream {
//!         "<s:Envelope/></s:Envelope>".into()
//!     }
//! }
//! ```

use async_trait::async_trait;

use super::request::RequestOptions;
use super::response::Response;
use crate::error::Result;

/// Executes built requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Handle returned for streaming requests
    type Stream: Send + 'static;

    /// Execute the request and return the raw response
    ///
    /// Failures (connection refused, DNS, TLS, timeout) are returned as errors
    /// and forwarded to the caller unchanged.
    async fn execute(&self, request: RequestOptions) -> Result<Response>;

    /// Start the request and return the transport's stream handle without
    /// reading the body
    fn open_stream(&self, request: RequestOptions) -> Self::Stream;
}
