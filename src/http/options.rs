// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Option overrides and their merge rules
//!
//! Callers pass extra request options as a name -> JSON value mapping. How each
//! name is merged into the built [`RequestOptions`] is decided by [`MERGE_RULES`]:
//! `headers` merges entry by entry, everything else replaces the field outright.

use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use super::request::{Payload, RequestOptions};
use crate::error::{Error, Result};

/// Option names understood by the request builder
pub mod names {
    pub const TARGET: &str = "target";
    pub const METHOD: &str = "method";
    pub const HEADERS: &str = "headers";
    pub const BODY: &str = "body";
    pub const FOLLOW_REDIRECTS: &str = "followRedirects";
    pub const TIMEOUT: &str = "timeout";
}

/// How an option override is merged into the request options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Merge the sub-mapping entry by entry into the existing value
    MergeEntries,
    /// Replace the existing value wholesale
    Replace,
}

/// Options with a non-default merge rule. Anything not listed is `Replace`.
pub const MERGE_RULES: &[(&str, MergeRule)] = &[(names::HEADERS, MergeRule::MergeEntries)];

/// Look up the merge rule for an option name
pub fn merge_rule(name: &str) -> MergeRule {
    MERGE_RULES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rule)| *rule)
        .unwrap_or(MergeRule::Replace)
}

/// Extra request options supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionOverrides(Map<String, Value>);

impl OptionOverrides {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value for the same name
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Add header entries, merged into the request headers
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let entry = self
            .0
            .entry(names::HEADERS)
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(name.into(), Value::String(value.into()));
        }
        self
    }

    /// Toggle redirect following
    pub fn follow_redirects(self, follow: bool) -> Self {
        self.set(names::FOLLOW_REDIRECTS, follow)
    }

    /// Per-request timeout
    pub fn timeout(self, timeout: Duration) -> Self {
        self.set(names::TIMEOUT, timeout.as_millis() as u64)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply every override to `options` according to [`merge_rule`]
    pub fn apply_to(&self, options: &mut RequestOptions) -> Result<()> {
        for (name, value) in self.iter() {
            match merge_rule(name) {
                MergeRule::MergeEntries => merge_entries(options, name, value)?,
                MergeRule::Replace => replace_field(options, name, value)?,
            }
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for OptionOverrides {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn merge_entries(options: &mut RequestOptions, name: &str, value: &Value) -> Result<()> {
    // headers is the only MergeEntries option
    let entries = value
        .as_object()
        .ok_or_else(|| Error::invalid_option(name, "expected an object of header values"))?;
    for (header, value) in entries {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                return Err(Error::invalid_option(
                    name,
                    format!("header '{}' must be a string, number or boolean", header),
                ))
            }
        };
        options.headers.insert(header.as_str(), value);
    }
    Ok(())
}

fn replace_field(options: &mut RequestOptions, name: &str, value: &Value) -> Result<()> {
    match name {
        names::TARGET => {
            let raw = value
                .as_str()
                .ok_or_else(|| Error::invalid_option(name, "expected a URL string"))?;
            options.target =
                Url::parse(raw).map_err(|e| Error::invalid_url(raw, e.to_string()))?;
        }
        names::METHOD => {
            let raw = value
                .as_str()
                .ok_or_else(|| Error::invalid_option(name, "expected a method string"))?;
            options.method = Method::from_bytes(raw.as_bytes())
                .map_err(|e| Error::invalid_option(name, e.to_string()))?;
        }
        names::BODY => {
            options.body = match value {
                Value::Null => None,
                Value::String(s) => Some(Payload::Text(s.clone())),
                _ => return Err(Error::invalid_option(name, "expected a string or null")),
            };
        }
        names::FOLLOW_REDIRECTS => {
            options.follow_redirects = value
                .as_bool()
                .ok_or_else(|| Error::invalid_option(name, "expected a boolean"))?;
        }
        names::TIMEOUT => {
            options.timeout = match value {
                Value::Null => None,
                _ => {
                    let millis = value.as_u64().ok_or_else(|| {
                        Error::invalid_option(name, "expected milliseconds as an unsigned integer")
                    })?;
                    Some(Duration::from_millis(millis))
                }
            };
        }
        _ => {
            options.extra.insert(name.to_string(), value.clone());
        }
    }
    Ok(())
}
