// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam and its reqwest implementation

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use url::Url;

use super::cookie::CookieJar;
use super::preset::HeaderSet;
use super::response::Response;
use super::{headers, DESKTOP_USER_AGENT};
use crate::config::ToolsConfig;
use crate::error::{Error, Result};

/// Fully resolved request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    /// Preset headers with caller overrides already applied
    pub headers: HeaderSet,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
    pub cookie_jar: Option<CookieJar>,
}

/// Executes one request, once
///
/// Implementations report non-2xx statuses as [`Error::Status`]. There is
/// no retry at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<Response>;
}

/// [`Transport`] backed by a shared `reqwest::Client`
///
/// Cookies are handled here rather than by reqwest: when the request carries
/// a jar, its cookies for the URL replace any preset `Cookie` header and
/// every `Set-Cookie` in the response is written back into it.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ToolsConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: &ToolsConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects));

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        let jar_cookies = request
            .cookie_jar
            .as_ref()
            .and_then(|jar| jar.get_cookie_header(&request.url));

        for (name, value) in request.headers.iter() {
            if jar_cookies.is_some() && name.eq_ignore_ascii_case(headers::COOKIE) {
                continue;
            }
            builder = builder.header(name, value);
        }

        if let Some(cookie_header) = jar_cookies {
            builder = builder.header(headers::COOKIE, cookie_header);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let response = builder.send().await?;
        let final_url = response.url().clone();
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.bytes().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let response = Response::new(status, response_headers, body, final_url, response_time);

        if let Some(ref jar) = request.cookie_jar {
            for cookie in response.set_cookies() {
                jar.add_from_header(cookie, &response.url);
            }
        }

        if !status.is_success() {
            return Err(Error::status(request.url.as_str(), status.as_u16()));
        }

        tracing::debug!(
            url = %response.url,
            status = status.as_u16(),
            elapsed_ms = response_time,
            "Request completed"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_invalid_proxy() {
        let config = ToolsConfig::quiet().proxy("::not a proxy::");
        assert!(matches!(
            ReqwestTransport::with_config(&config),
            Err(Error::Config(_))
        ));
    }
}
