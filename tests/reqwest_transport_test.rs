// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::time::Duration;

use soap_http::http::DEFAULT_USER_AGENT;
use soap_http::{Error, Headers, HttpClient, OptionOverrides, ResponseBody};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REQUEST: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><GetQuote/></soap:Body></soap:Envelope>"#;
const ENVELOPE: &str = r#"<?xml version="1.0"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><Quote>42</Quote></soap:Body></soap:Envelope>"#;

fn wrapped() -> String {
    format!("--MIMEBoundary\r\nContent-Type: text/xml\r\n\r\n{}\r\n--MIMEBoundary--", ENVELOPE)
}

#[tokio::test]
async fn test_post_sends_defaults_and_normalizes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/service"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header("Content-Length", REQUEST.len().to_string().as_str()))
        .and(header("User-Agent", DEFAULT_USER_AGENT))
        .and(header("Accept-Charset", "utf-8"))
        .and(header("SOAPAction", "\"urn:GetQuote\""))
        .and(body_string(REQUEST))
        .respond_with(ResponseTemplate::new(200).set_body_string(wrapped()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let response = client
        .request(
            &format!("{}/service", server.uri()),
            Some(REQUEST.into()),
            &Headers::from([("SOAPAction", "\"urn:GetQuote\"")]),
            &OptionOverrides::new(),
        )
        .await
        .unwrap();

    assert!(response.is_success());
    assert!(!response.redirected);
    assert_eq!(response.text(), Some(ENVELOPE));
}

#[tokio::test]
async fn test_get_fault_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/service"))
        .respond_with(ResponseTemplate::new(500).set_body_string(format!("junk{}junk", ENVELOPE)))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let mut received = None;
    client
        .send(
            &format!("{}/service", server.uri()),
            None,
            &Headers::new(),
            &OptionOverrides::new(),
            |outcome| received = Some(outcome),
        )
        .await
        .unwrap();

    let response = received.unwrap().unwrap();
    assert!(response.is_server_error());
    assert_eq!(response.text(), Some(ENVELOPE));
}

#[tokio::test]
async fn test_redirects_follow_option() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/new", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ENVELOPE))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let url = format!("{}/old", server.uri());

    let followed = client
        .request(&url, None, &Headers::new(), &OptionOverrides::new())
        .await
        .unwrap();
    assert_eq!(followed.status_code(), 200);
    assert!(followed.redirected);
    assert!(followed.url_str().ends_with("/new"));
    assert_eq!(followed.text(), Some(ENVELOPE));

    let not_followed = client
        .request(&url, None, &Headers::new(), &OptionOverrides::new().follow_redirects(false))
        .await
        .unwrap();
    assert_eq!(not_followed.status_code(), 302);
    assert!(!not_followed.redirected);
}

#[tokio::test]
async fn test_request_stream_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(wrapped()))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let response = client
        .request_stream(
            &server.uri(),
            Some(REQUEST.into()),
            &Headers::new(),
            &OptionOverrides::new(),
        )
        .unwrap()
        .await
        .unwrap();

    let raw = response.text().await.unwrap();
    assert_eq!(raw, wrapped());
}

#[tokio::test]
async fn test_timeout_option_is_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ENVELOPE)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let err = client
        .request(
            &server.uri(),
            None,
            &Headers::new(),
            &OptionOverrides::new().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_binary_body_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xffu8, 0xfe, b'<', 0x00]))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let response = client
        .request(&server.uri(), None, &Headers::new(), &OptionOverrides::new())
        .await
        .unwrap();

    assert_eq!(
        response.body,
        ResponseBody::Binary(vec![0xffu8, 0xfe, b'<', 0x00].into())
    );
}

#[tokio::test]
async fn test_latin1_body_is_decoded_and_normalized() {
    let server = MockServer::start().await;
    let mut body = b"HTTP junk<soap:Envelope><soap:Body><Name>caf".to_vec();
    body.push(0xe9);
    body.extend_from_slice(b"</Name></soap:Body></soap:Envelope>trailer");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/xml; charset=ISO-8859-1"))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let response = client
        .request(&server.uri(), None, &Headers::new(), &OptionOverrides::new())
        .await
        .unwrap();

    assert_eq!(
        response.text(),
        Some("<soap:Envelope><soap:Body><Name>café</Name></soap:Body></soap:Envelope>")
    );
}

#[tokio::test]
async fn test_connection_refused_reaches_callback() {
    // nothing listens on the discard port
    let client = HttpClient::new().unwrap();
    let mut received = None;

    client
        .send(
            "http://127.0.0.1:9/service",
            Some(REQUEST.into()),
            &Headers::new(),
            &OptionOverrides::new(),
            |outcome| received = Some(outcome),
        )
        .await
        .unwrap();

    match received.unwrap() {
        Err(e @ Error::Http(_)) => assert!(e.is_transport()),
        other => panic!("expected transport error, got {:?}", other.map(|r| r.status)),
    }
}
