// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! soap-http CLI
//!
//! Sends a single request through the library and prints the normalized body.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use soap_http::{Headers, HttpClient, OptionOverrides, Payload};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("soap_http=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "get" => {
            if args.len() < 3 {
                eprintln!("Usage: soap-http get <url>");
                return ExitCode::from(1);
            }
            fetch(&args[2], None, args.get(3).map(String::as_str)).await
        }
        "post" => {
            if args.len() < 4 {
                eprintln!("Usage: soap-http post <url> <file> [soap-action]");
                return ExitCode::from(1);
            }
            match read_payload(&args[3]) {
                Ok(payload) => fetch(&args[2], Some(payload), args.get(4).map(String::as_str)).await,
                Err(e) => Err(e),
            }
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("soap-http {}", soap_http::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"soap-http - HTTP transport for SOAP clients

USAGE:
    soap-http <COMMAND> [OPTIONS]

COMMANDS:
    get <url> [soap-action]            GET a URL (e.g. a WSDL) and print the normalized body
    post <url> <file> [soap-action]    POST the file contents and print the normalized body
    help                               Show this help message
    version                            Show version information

EXAMPLES:
    soap-http get "https://example.com/service?wsdl"
    soap-http post https://example.com/service request.xml '"urn:GetQuote"'

Set RUST_LOG=soap_http=debug to log built requests and raw response bodies.
"#
    );
}

fn read_payload(path: &str) -> anyhow::Result<Payload> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload from {}", path))?;
    Ok(Payload::Text(text))
}

async fn fetch(url: &str, payload: Option<Payload>, soap_action: Option<&str>) -> anyhow::Result<()> {
    let client = HttpClient::new().context("Failed to create HTTP client")?;

    let mut headers = Headers::new();
    if let Some(action) = soap_action {
        headers.insert("SOAPAction", action);
    }
    if payload.is_some() {
        headers.insert("Content-Type", "text/xml; charset=utf-8");
    }

    let response = client
        .request(url, payload, &headers, &OptionOverrides::new())
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    println!("Status: {}", response.status);
    if response.redirected {
        println!("Final URL: {}", response.url);
    }
    println!("Response time: {}ms", response.response_time_ms);
    println!();
    println!("{}", response.body.text_lossy());

    Ok(())
}
