// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # soap-http - HTTP transport shim for SOAP clients
//!
//! Builds outbound SOAP requests, sends them through an injectable transport
//! and cleans up the response body before it reaches the XML parser.
//!
//! ## Features
//!
//! - Request construction: fixed default headers, header overrides, option
//!   overrides with an explicit merge rule table
//! - Envelope extraction: strips transport framing and junk around the SOAP
//!   envelope
//! - Logical address repair: reorders a misplaced `itr:LogicalAddress` WSDL part
//! - Pluggable transport: reqwest by default, any [`http::Transport`] otherwise
//!
//! ## Example
//!
//! ```rust,no_run
//! use soap_http::{Headers, HttpClient, OptionOverrides};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new()?;
//!     let headers = Headers::from([("SOAPAction", "\"urn:GetQuote\"")]);
//!
//!     let response = client
//!         .request(
//!             "https://example.com/soap",
//!             Some("<soap:Envelope>...</soap:Envelope>".into()),
//!             &headers,
//!             &OptionOverrides::new(),
//!         )
//!         .await?;
//!
//!     println!("{}: {}", response.status, response.body.text_lossy());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// Client and transport
pub use http::{HttpClient, HttpClientConfig, ReqwestTransport, Transport, TransportConfig};

// Request construction
pub use http::{Headers, OptionOverrides, Payload, RequestBuilder, RequestOptions};

// Responses and normalization
pub use http::{Response, ResponseBody, ResponseNormalizer};

/// soap-http version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
