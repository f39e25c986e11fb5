// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request executor
//!
//! Normalizes options, applies the platform preset, submits the request
//! through a [`Transport`] and decodes the body. A failure is written to the
//! error path of the log (URL and error) and returned as `Err` with its kind
//! intact; nothing here panics on a bad request.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use super::preset::{headers_for, HeaderSet, Platform};
use super::request::{RequestOptions, RequestShape, ResponseType};
use super::response::{Body, RequestResult};
use super::transport::{ReqwestTransport, Transport, TransportRequest};
use super::{headers, DEFAULT_FORM_CONTENT_TYPE};
use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use crate::log::LogSink;

/// Executes requests for the rest of the application
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    log: Arc<LogSink>,
}

impl HttpClient {
    /// Create a client over an existing transport
    pub fn new(transport: Arc<dyn Transport>, log: Arc<LogSink>) -> Self {
        Self { transport, log }
    }

    /// Create a client backed by reqwest
    pub fn with_config(config: &ToolsConfig, log: Arc<LogSink>) -> Result<Self> {
        let transport = ReqwestTransport::with_config(config)?;
        Ok(Self::new(Arc::new(transport), log))
    }

    /// Preset headers for `platform` with the caller's headers merged on top
    ///
    /// POST requests without a `Content-Type` get the url-encoded form type.
    pub fn resolve_headers(options: &RequestOptions, platform: Platform) -> HeaderSet {
        let mut merged = match options.headers.clone() {
            Some(overrides) => headers_for(platform).merge(overrides),
            None => headers_for(platform),
        };

        if options.is_post() && !merged.contains(headers::CONTENT_TYPE) {
            merged.insert(headers::CONTENT_TYPE, DEFAULT_FORM_CONTENT_TYPE);
        }

        merged
    }

    /// Turn canonical options into the request the transport sees
    ///
    /// A form body is url-encoded and, for methods other than POST, labelled
    /// with the form type unless the caller chose one.
    pub fn prepare(options: RequestOptions, platform: Platform) -> Result<TransportRequest> {
        let mut request_headers = Self::resolve_headers(&options, platform);

        let mut url = Url::parse(&options.url)?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(options.query.iter());
        }

        let method = match options.method.as_deref() {
            Some(m) => Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                .map_err(|_| Error::other(format!("Invalid HTTP method: {}", m)))?,
            None => Method::GET,
        };

        let body = match options.form {
            Some(ref fields) => {
                if !request_headers.contains(headers::CONTENT_TYPE) {
                    request_headers.insert(headers::CONTENT_TYPE, DEFAULT_FORM_CONTENT_TYPE);
                }
                Some(
                    url::form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(fields.iter())
                        .finish()
                        .into(),
                )
            }
            None => options.body,
        };

        Ok(TransportRequest {
            method,
            url,
            headers: request_headers,
            body,
            timeout: options.timeout,
            cookie_jar: options.cookie_jar,
        })
    }

    /// Execute a request and decode its body per the options' response type
    pub async fn execute(
        &self,
        shape: impl Into<RequestShape>,
        platform: Platform,
    ) -> Result<RequestResult<Body>> {
        let options = shape.into().normalize();
        let url = options.url.clone();

        match self.send(options, platform).await {
            Ok(result) => Ok(result),
            Err(e) => {
                self.log.error_parts(&[&url, &e]);
                Err(e)
            }
        }
    }

    /// Execute a request and deserialize its JSON body into `T`
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        shape: impl Into<RequestShape>,
        platform: Platform,
    ) -> Result<RequestResult<T>> {
        let mut options = shape.into().normalize();
        options.response_type = ResponseType::Json;
        let url = options.url.clone();

        let result = match self.send(options, platform).await {
            Ok(result) => {
                let RequestResult { response, body } = result;
                body.into_typed::<T>()
                    .map(|body| RequestResult { response, body })
            }
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            self.log.error_parts(&[&url, e]);
        }
        result
    }

    /// Execute several requests concurrently
    pub async fn execute_all(
        &self,
        requests: Vec<(RequestShape, Platform)>,
    ) -> Vec<Result<RequestResult<Body>>> {
        let futures: Vec<_> = requests
            .into_iter()
            .map(|(shape, platform)| self.execute(shape, platform))
            .collect();
        futures::future::join_all(futures).await
    }

    async fn send(&self, options: RequestOptions, platform: Platform) -> Result<RequestResult<Body>> {
        let response_type = options.response_type;
        let request = Self::prepare(options, platform)?;
        let response = self.transport.execute(request).await?;
        let body = response.decode(response_type)?;
        Ok(RequestResult { response, body })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{LegacyOptions, Response};
    use crate::log::{LogRecord, Severity};
    use async_trait::async_trait;
    use bytes::Bytes;
    use parking_lot::Mutex;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct MockTransport {
        replies: Mutex<VecDeque<Result<Response>>>,
        seen: Mutex<Vec<TransportRequest>>,
    }

    impl MockTransport {
        fn reply(self, status: u16, body: &'static str) -> Self {
            let reply = if (200..300).contains(&status) {
                Ok(Response::new(
                    StatusCode::from_u16(status).unwrap(),
                    HeaderMap::new(),
                    Bytes::from(body),
                    Url::parse("https://api.live.bilibili.com/").unwrap(),
                    1,
                ))
            } else {
                Err(Error::status("https://api.live.bilibili.com/", status))
            };
            self.replies.lock().push_back(reply);
            self
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, request: TransportRequest) -> Result<Response> {
            self.seen.lock().push(request);
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::other("no reply queued")))
        }
    }

    fn client(transport: Arc<MockTransport>) -> (HttpClient, Arc<Mutex<Vec<LogRecord>>>) {
        let log = Arc::new(LogSink::new());
        let records = Arc::new(Mutex::new(Vec::new()));
        let target = records.clone();
        log.subscribe(Arc::new(move |r: &LogRecord| target.lock().push(r.clone())));
        (HttpClient::new(transport, log), records)
    }

    #[test]
    fn test_post_gets_form_content_type() {
        let headers = HttpClient::resolve_headers(
            &RequestOptions::new("https://example.com").method("post"),
            Platform::Pc,
        );
        assert_eq!(headers.get("Content-Type"), Some(DEFAULT_FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_get_has_no_content_type() {
        let headers =
            HttpClient::resolve_headers(&RequestOptions::get("https://example.com"), Platform::Pc);
        assert!(!headers.contains("Content-Type"));
        let headers =
            HttpClient::resolve_headers(&RequestOptions::new("https://example.com"), Platform::Android);
        assert!(!headers.contains("Content-Type"));
    }

    #[test]
    fn test_form_on_get_not_labelled_by_header_merge() {
        let options = RequestOptions::get("https://example.com").form([("a", "1")]);
        let headers = HttpClient::resolve_headers(&options, Platform::Pc);
        assert!(!headers.contains("Content-Type"));
    }

    #[test]
    fn test_prepare_labels_form_body_for_other_methods() {
        let options = RequestOptions::new("https://example.com")
            .method("put")
            .form([("a", "1")]);
        let request = HttpClient::prepare(options, Platform::Android).unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(
            request.headers.get("content-type"),
            Some(DEFAULT_FORM_CONTENT_TYPE)
        );

        let options = RequestOptions::new("https://example.com")
            .method("put")
            .header("Content-Type", "text/plain")
            .form([("a", "1")]);
        let request = HttpClient::prepare(options, Platform::Android).unwrap();
        assert_eq!(request.headers.get("content-type"), Some("text/plain"));
    }

    #[test]
    fn test_caller_content_type_kept() {
        let options = RequestOptions::post("https://example.com").header("content-type", "text/plain");
        let headers = HttpClient::resolve_headers(&options, Platform::WebView);
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn test_caller_headers_win() {
        let options = RequestOptions::get("https://example.com").header("User-Agent", "custom");
        let headers = HttpClient::resolve_headers(&options, Platform::Android);
        assert_eq!(headers.get("user-agent"), Some("custom"));
        assert_eq!(headers.get("Connection"), Some("Keep-Alive"));
    }

    #[test]
    fn test_prepare_form_and_query() {
        let options = RequestOptions::post("https://example.com/api")
            .form([("roomid", "1"), ("msg", "hi there")])
            .query("a", "b");
        let request = HttpClient::prepare(options, Platform::Pc).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), "https://example.com/api?a=b");
        assert_eq!(request.body.unwrap(), Bytes::from("roomid=1&msg=hi+there"));
    }

    #[test]
    fn test_prepare_defaults_to_get() {
        let request = HttpClient::prepare(RequestOptions::new("https://example.com"), Platform::Pc).unwrap();
        assert_eq!(request.method, Method::GET);
    }

    #[test]
    fn test_prepare_rejects_bad_url() {
        let err = HttpClient::prepare(RequestOptions::new(""), Platform::Pc).unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[tokio::test]
    async fn test_execute_success_json() {
        let transport = Arc::new(MockTransport::default().reply(200, r#"{"code":0}"#));
        let (client, records) = client(transport.clone());

        let legacy = LegacyOptions {
            uri: Some("https://api.live.bilibili.com/room".into()),
            json: Some(true),
            ..Default::default()
        };
        let result = client.execute(legacy, Platform::Android).await.unwrap();

        assert_eq!(result.body.as_json(), Some(&serde_json::json!({ "code": 0 })));
        assert!(records.lock().is_empty());
        let seen = transport.seen.lock();
        assert_eq!(seen[0].url.as_str(), "https://api.live.bilibili.com/room");
        assert_eq!(seen[0].headers.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_failure_logged_once() {
        let transport = Arc::new(MockTransport::default().reply(503, ""));
        let (client, records) = client(transport);

        let err = client
            .execute(RequestOptions::get("https://api.live.bilibili.com/"), Platform::Pc)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(503));
        let records = records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Error);
        assert!(records[0].text.starts_with("https://api.live.bilibili.com/ "));
    }

    #[tokio::test]
    async fn test_execute_json_typed() {
        #[derive(serde::Deserialize)]
        struct Reply {
            code: i32,
            data: Vec<u32>,
        }

        let transport = Arc::new(MockTransport::default().reply(200, r#"{"code":0,"data":[1,2]}"#));
        let (client, _) = client(transport);

        let result = client
            .execute_json::<Reply>(RequestOptions::get("https://example.com"), Platform::Pc)
            .await
            .unwrap();
        assert_eq!(result.body.code, 0);
        assert_eq!(result.body.data, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_execute_json_decode_error_logged() {
        let transport = Arc::new(MockTransport::default().reply(200, "<html>"));
        let (client, records) = client(transport);

        let err = client
            .execute_json::<serde_json::Value>(RequestOptions::get("https://example.com"), Platform::Pc)
            .await
            .unwrap_err();
        assert!(err.is_parse());
        assert_eq!(records.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_all_keeps_order() {
        let transport = Arc::new(
            MockTransport::default()
                .reply(200, "first")
                .reply(404, ""),
        );
        let (client, _) = client(transport);

        let results = client
            .execute_all(vec![
                (RequestOptions::get("https://example.com/1").into(), Platform::Pc),
                (RequestOptions::get("https://example.com/2").into(), Platform::Pc),
            ])
            .await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().body.as_text(), Some("first"));
        assert!(results[1].is_err());
    }
}
