// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request option shapes and their normalization
//!
//! Older plugins describe requests with the legacy field names (`uri`, `jar`,
//! `encoding: null`, `json: true`). [`RequestShape`] accepts either shape and
//! [`RequestShape::normalize`] is the single place where legacy fields are
//! translated, so the executor only ever sees [`RequestOptions`].

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};

use super::cookie::CookieJar;
use super::preset::HeaderSet;
use crate::error::Result;

/// How the response body should be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// UTF-8 text
    #[default]
    Text,
    /// Raw bytes
    Buffer,
    /// Parsed JSON value
    Json,
}

/// Canonical request description consumed by the executor
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request URL
    pub url: String,
    /// Request method; `None` means the transport default (GET)
    pub method: Option<String>,
    /// Caller headers, merged over the platform preset
    pub headers: Option<HeaderSet>,
    /// Body decoding
    pub response_type: ResponseType,
    /// Cookie jar read from and written to during the request
    pub cookie_jar: Option<CookieJar>,
    /// Raw request body
    pub body: Option<Bytes>,
    /// Form fields, url-encoded into the body
    pub form: Option<Vec<(String, String)>>,
    /// Query string pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create options for a URL with the transport's default method
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create GET options
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).method("GET")
    }

    /// Create POST options
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).method("POST")
    }

    /// Set the method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(HeaderSet::new).insert(name, value);
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set form fields
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Set a JSON body
    pub fn json_body<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        Ok(self.header("Content-Type", "application/json"))
    }

    /// Add a query pair
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set body decoding
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Attach a cookie jar
    pub fn cookie_jar(mut self, jar: CookieJar) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// True when the method is POST, case-insensitively
    pub fn is_post(&self) -> bool {
        self.method
            .as_deref()
            .map_or(false, |m| m.eq_ignore_ascii_case("POST"))
    }
}

/// Request options as written by older callers
///
/// Both the legacy and the current spelling of a field may be present; the
/// current one wins during normalization. Deserializes from the JSON object
/// shape plugins send.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyOptions {
    pub url: Option<String>,
    /// Legacy spelling of `url`
    pub uri: Option<String>,
    pub method: Option<String>,
    pub headers: Option<HeaderSet>,
    #[serde(skip)]
    pub cookie_jar: Option<CookieJar>,
    /// Legacy spelling of `cookie_jar`
    #[serde(skip)]
    pub jar: Option<CookieJar>,
    /// `Some(None)` is the legacy explicit `null`, meaning raw bytes
    #[serde(deserialize_with = "explicit_null")]
    pub encoding: Option<Option<String>>,
    /// Legacy `json: true` marker
    pub json: Option<bool>,
    pub response_type: Option<ResponseType>,
    pub body: Option<String>,
    pub form: Option<BTreeMap<String, String>>,
    #[serde(rename = "qs")]
    pub query: Option<BTreeMap<String, String>>,
    /// Timeout in milliseconds
    pub timeout: Option<u64>,
}

/// Keep `null` distinguishable from an absent field
fn explicit_null<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Either request shape; convert with [`RequestShape::normalize`]
#[derive(Debug, Clone)]
pub enum RequestShape {
    Legacy(LegacyOptions),
    Canonical(RequestOptions),
}

impl RequestShape {
    /// Parse the JSON object form used by plugins
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(RequestShape::Legacy(serde_json::from_value(value)?))
    }

    /// Translate to the canonical shape. Never fails.
    pub fn normalize(self) -> RequestOptions {
        match self {
            RequestShape::Canonical(options) => options,
            RequestShape::Legacy(legacy) => legacy.into_canonical(),
        }
    }
}

impl From<RequestOptions> for RequestShape {
    fn from(options: RequestOptions) -> Self {
        RequestShape::Canonical(options)
    }
}

impl From<LegacyOptions> for RequestShape {
    fn from(options: LegacyOptions) -> Self {
        RequestShape::Legacy(options)
    }
}

impl LegacyOptions {
    fn into_canonical(self) -> RequestOptions {
        let url = self.url.or(self.uri).unwrap_or_default();
        let cookie_jar = self.cookie_jar.or(self.jar);

        let mut response_type = self.response_type.unwrap_or_default();
        if matches!(self.encoding, Some(None)) {
            response_type = ResponseType::Buffer;
        }
        if self.json == Some(true) {
            response_type = ResponseType::Json;
        }

        RequestOptions {
            url,
            method: self.method,
            headers: self.headers,
            response_type,
            cookie_jar,
            body: self.body.map(Bytes::from),
            form: self.form.map(|f| f.into_iter().collect()),
            query: self.query.map(|q| q.into_iter().collect()).unwrap_or_default(),
            timeout: self.timeout.map(Duration::from_millis),
        }
    }
}
