// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport layer for SOAP clients
//!
//! Builds outbound requests, hands them to an injectable [`Transport`] and
//! normalizes the response body so the SOAP envelope can be parsed.

mod client;
mod config;
mod headers;
mod normalize;
pub mod options;
mod request;
mod response;
mod reqwest_transport;
mod transport;

pub use client::HttpClient;
pub use config::{HttpClientConfig, TransportConfig};
pub use headers::Headers;
pub use normalize::{
    extract_envelope, normalize, repair_logical_address_block, strip_first_comment,
    ResponseNormalizer, LINE_ENDING,
};
pub use options::{merge_rule, MergeRule, OptionOverrides};
pub use request::{Payload, RequestBuilder, RequestOptions};
pub use response::{Response, ResponseBody};
pub use reqwest_transport::{ReqwestTransport, ResponseStream};
pub use transport::Transport;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("soap-http/", env!("CARGO_PKG_VERSION"));

/// Default Accept header value
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml,text/xml;q=0.9,*/*;q=0.8";

/// Content-Type sent with textual payloads
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Header names, spelled the way they go on the wire
pub mod names {
    pub const USER_AGENT: &str = "User-Agent";
    pub const ACCEPT: &str = "Accept";
    pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
    pub const ACCEPT_CHARSET: &str = "Accept-Charset";
    pub const CONNECTION: &str = "Connection";
    pub const HOST: &str = "Host";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_TYPE: &str = "Content-Type";
}

/// The header set every request starts from
pub fn default_headers(user_agent: &str, host: &str) -> Headers {
    Headers::from([
        (names::USER_AGENT, user_agent),
        (names::ACCEPT, DEFAULT_ACCEPT),
        (names::ACCEPT_ENCODING, "none"),
        (names::ACCEPT_CHARSET, "utf-8"),
        (names::CONNECTION, "close"),
        (names::HOST, host),
    ])
}
