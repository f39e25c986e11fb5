// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::headers;
use super::request::ResponseType;
use crate::error::{Error, Result};

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Set-Cookie header values, skipping ones that are not valid text
    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .get_all(headers::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Decode the body as requested by the caller
    pub fn decode(&self, response_type: ResponseType) -> Result<Body> {
        Ok(match response_type {
            ResponseType::Buffer => Body::Buffer(self.body.clone()),
            ResponseType::Text => Body::Text(self.text_lossy()),
            ResponseType::Json => Body::Json(serde_json::from_slice(&self.body)?),
        })
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Buffer(Bytes),
    Json(serde_json::Value),
}

impl Body {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Buffer(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Deserialize into a typed value
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Body::Json(v) => serde_json::from_value(v).map_err(Error::from),
            Body::Text(s) => serde_json::from_str(&s).map_err(Error::from),
            Body::Buffer(b) => serde_json::from_slice(&b).map_err(Error::from),
        }
    }
}

/// A successful request: transport response plus decoded body
#[derive(Debug, Clone)]
pub struct RequestResult<T> {
    pub response: Response,
    pub body: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &'static str) -> Response {
        Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from(body),
            Url::parse("https://example.com").unwrap(),
            12,
        )
    }

    #[test]
    fn test_response_status() {
        let resp = response("");
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_set_cookies() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", "a=1; Path=/".parse().unwrap());
        headers.append("Set-Cookie", "b=2".parse().unwrap());
        headers.append("set-cookie", reqwest::header::HeaderValue::from_bytes(b"c=\xff").unwrap());
        headers.insert("content-type", "text/plain".parse().unwrap());

        let resp = Response::new(
            StatusCode::OK,
            headers,
            Bytes::new(),
            Url::parse("https://example.com").unwrap(),
            0,
        );
        assert_eq!(resp.set_cookies(), vec!["a=1; Path=/", "b=2"]);
        assert!(response("").set_cookies().is_empty());
    }

    #[test]
    fn test_decode_variants() {
        let resp = response(r#"{"code":0}"#);
        assert_eq!(
            resp.decode(ResponseType::Text).unwrap().as_text(),
            Some(r#"{"code":0}"#)
        );
        assert_eq!(
            resp.decode(ResponseType::Buffer).unwrap().as_bytes().map(|b| b.len()),
            Some(10)
        );
        assert_eq!(
            resp.decode(ResponseType::Json).unwrap().as_json(),
            Some(&serde_json::json!({ "code": 0 }))
        );
    }

    #[test]
    fn test_decode_bad_json() {
        let err = response("<html>").decode(ResponseType::Json).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_into_typed() {
        #[derive(serde::Deserialize)]
        struct Reply {
            code: i32,
        }
        let reply: Reply = Body::Text(r#"{"code":-101}"#.into()).into_typed().unwrap();
        assert_eq!(reply.code, -101);
    }
}
