// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The shared tools service
//!
//! [`Tools`] is built once at startup and handed by reference to every part
//! of the application that needs to make requests, read cookies or log.
//! Dropping it detaches its system-message listener; the log tail goes with it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use crate::http::{
    self, Body, CookieJar, CookieStore, HeaderSet, HttpClient, Platform, RequestResult,
    RequestShape, ReqwestTransport, Transport,
};
use crate::log::{
    self, ConsoleWriter, Event, EventBus, EventCallback, EventForwarder, ListenerId, LogSink,
    LogTail,
};
use crate::util::{self, Slept};

/// Solves a login captcha; installed by the embedding application
#[async_trait]
pub trait CaptchaSolver: Send + Sync {
    /// `captcha_jpeg` is the base64 image as delivered by the API
    async fn solve(&self, captcha_jpeg: &str) -> Result<String>;
}

/// Forwards a message to an external chat or notification channel
pub trait MessageSender: Send + Sync {
    fn send(&self, message: &str);
}

impl<F> MessageSender for F
where
    F: Fn(&str) + Send + Sync,
{
    fn send(&self, message: &str) {
        self(message)
    }
}

/// Request, cookie and logging tools shared across the application
pub struct Tools {
    config: ToolsConfig,
    log: Arc<LogSink>,
    tail: Arc<LogTail>,
    events: Arc<EventBus>,
    http: HttpClient,
    captcha: RwLock<Option<Arc<dyn CaptchaSolver>>>,
    messenger: RwLock<Option<Arc<dyn MessageSender>>>,
    system_listener: ListenerId,
}

impl Tools {
    /// Create the tools over a reqwest transport
    pub fn new(config: ToolsConfig) -> Result<Self> {
        let transport = ReqwestTransport::with_config(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create the tools over any transport
    pub fn with_transport(config: ToolsConfig, transport: Arc<dyn Transport>) -> Self {
        let log = Arc::new(LogSink::new());
        let tail = Arc::new(LogTail::new(config.log_capacity));
        let events = Arc::new(EventBus::new());

        log.subscribe(tail.clone());
        log.subscribe(Arc::new(EventForwarder::new(events.clone())));
        if config.echo_to_console {
            log.subscribe(Arc::new(ConsoleWriter::new()));
        }

        let weak_log = Arc::downgrade(&log);
        let system_listener = events.subscribe(Arc::new(move |event: &Event| {
            if let Event::SystemMessage { message } = event {
                if let Some(log) = weak_log.upgrade() {
                    log.info(message);
                }
            }
        }));

        tracing::debug!(
            log_capacity = config.log_capacity,
            console = config.echo_to_console,
            "Tools initialised"
        );

        Self {
            http: HttpClient::new(transport, log.clone()),
            config,
            log,
            tail,
            events,
            captcha: RwLock::new(None),
            messenger: RwLock::new(None),
            system_listener,
        }
    }

    pub fn config(&self) -> &ToolsConfig {
        &self.config
    }

    /// The underlying request executor
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The log sink, for adding subscribers
    pub fn log_sink(&self) -> &Arc<LogSink> {
        &self.log
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Header preset for a platform
    pub fn headers(&self, platform: Platform) -> HeaderSet {
        http::headers_for(platform)
    }

    /// Execute a request with the platform's headers
    pub async fn xhr(
        &self,
        shape: impl Into<RequestShape>,
        platform: Platform,
    ) -> Result<RequestResult<Body>> {
        self.http.execute(shape, platform).await
    }

    /// Execute a request and deserialize its JSON body
    pub async fn xhr_json<T: DeserializeOwned>(
        &self,
        shape: impl Into<RequestShape>,
        platform: Platform,
    ) -> Result<RequestResult<T>> {
        self.http.execute_json(shape, platform).await
    }

    /// Cookie value for the default API origin, or `""`
    pub fn cookie(&self, store: &dyn CookieStore, key: &str) -> String {
        http::read_value(store, key, &self.config.cookie_read_url)
    }

    /// Cookie value for `url`, or `""`
    pub fn cookie_at(&self, store: &dyn CookieStore, key: &str, url: &str) -> String {
        http::read_value(store, key, url)
    }

    /// Build a fresh jar from a `name=value; ...` string
    pub fn set_cookie(&self, cookie_string: &str) -> Result<CookieJar> {
        http::build_store(cookie_string, &self.config)
    }

    /// Parse JSON, logging malformed input
    pub fn parse_json<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        util::parse_json(&self.log, text)
    }

    /// Parse JSON through a reviver, logging malformed input
    pub fn parse_json_with<T, F>(&self, text: &str, reviver: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&str, Value) -> Option<Value>,
    {
        util::parse_json_with(&self.log, text, reviver)
    }

    /// Hex digest of `data`
    pub fn hash(&self, algorithm: &str, data: impl AsRef<[u8]>) -> Result<String> {
        util::hash(algorithm, data)
    }

    /// Display timestamp used as the log line prefix
    pub fn date(&self) -> String {
        log::timestamp()
    }

    /// Informational line: kept in the tail, published and echoed to stdout
    pub fn log(&self, message: impl fmt::Display) {
        self.log.info(message);
    }

    /// Space-joined informational line
    pub fn log_parts(&self, parts: &[&dyn fmt::Display]) {
        self.log.info_parts(parts);
    }

    /// Error line: stderr only
    pub fn error_log(&self, message: impl fmt::Display) {
        self.log.error(message);
    }

    /// Space-joined error line
    pub fn error_log_parts(&self, parts: &[&dyn fmt::Display]) {
        self.log.error_parts(parts);
    }

    /// Buffered informational lines, oldest first
    pub fn logs(&self) -> Vec<String> {
        self.tail.lines()
    }

    /// Listen to bus events (new log lines, system messages)
    pub fn subscribe(&self, callback: EventCallback) -> ListenerId {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Announce a system message; it is logged as an informational line
    pub fn system_message(&self, message: impl Into<String>) {
        self.events.publish(&Event::SystemMessage {
            message: message.into(),
        });
    }

    /// Wait for `duration`
    pub async fn sleep(&self, duration: Duration) -> Slept {
        util::sleep(duration).await
    }

    pub fn set_captcha_solver(&self, solver: Arc<dyn CaptchaSolver>) {
        *self.captcha.write() = Some(solver);
    }

    /// Solve a captcha with the installed solver
    pub async fn captcha(&self, captcha_jpeg: &str) -> Result<String> {
        let solver = self.captcha.read().clone();
        match solver {
            Some(solver) => solver.solve(captcha_jpeg).await,
            None => {
                tracing::warn!("Captcha requested but no solver is installed");
                Err(Error::HookMissing("captcha solver"))
            }
        }
    }

    pub fn set_message_sender(&self, sender: Arc<dyn MessageSender>) {
        *self.messenger.write() = Some(sender);
    }

    /// Forward a message through the installed sender
    pub fn send_message(&self, message: &str) -> Result<()> {
        let sender = self.messenger.read().clone();
        match sender {
            Some(sender) => {
                sender.send(message);
                Ok(())
            }
            None => {
                tracing::warn!("Message send requested but no sender is installed");
                Err(Error::HookMissing("message sender"))
            }
        }
    }
}

impl Drop for Tools {
    fn drop(&mut self) {
        self.events.unsubscribe(self.system_listener);
    }
}

impl fmt::Debug for Tools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tools")
            .field("config", &self.config)
            .field("log_lines", &self.tail.len())
            .field("listeners", &self.events.listener_count())
            .finish()
    }
}
