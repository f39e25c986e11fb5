// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # bilive-tools - shared request, cookie and logging tools
//!
//! The process-wide helpers a live-streaming API client leans on:
//!
//! - Header presets per simulated client (desktop, mobile app, in-app browser)
//! - One canonical request shape, with older option spellings still accepted
//! - Request execution that logs failures and returns them as typed errors
//! - Single-value cookie reads and cookie-string jars
//! - A log with a bounded in-memory tail and an event bus for new lines
//! - JSON parsing, hashing and delays
//!
//! ## Example
//!
//! ```rust,no_run
//! use bilive_tools::{LegacyOptions, Platform, Tools, ToolsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     bilive_tools::init_logging();
//!     let tools = Tools::new(ToolsConfig::default())?;
//!
//!     let options = LegacyOptions {
//!         uri: Some("https://api.live.bilibili.com/room/v1/Room/get_info?id=1".into()),
//!         json: Some(true),
//!         ..Default::default()
//!     };
//!     if let Ok(result) = tools.xhr(options, Platform::Pc).await {
//!         tools.log(format!("status {}", result.response.status));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod log;
pub mod tools;
pub mod util;

// Re-exports for convenience

pub use config::ToolsConfig;
pub use error::{Error, Result};
pub use http::{
    build_store, headers_for, read_value, Body, Cookie, CookieJar, CookieStore, HeaderSet,
    HttpClient, LegacyOptions, Platform, RequestOptions, RequestResult, RequestShape,
    ReqwestTransport, Response, ResponseType, Transport, TransportRequest,
};
pub use log::{Event, EventBus, LogRecord, LogSink, LogSubscriber, LogTail, Severity};
pub use tools::{CaptchaSolver, MessageSender, Tools};
pub use util::{hash, parse_json, parse_json_with, sleep, HashAlgorithm, Slept};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install a `tracing` subscriber for the crate's internal diagnostics
///
/// Honours `RUST_LOG`; defaults to `bilive_tools=info`. Safe to call more
/// than once, later calls are ignored.
pub fn init_logging() {
    let directive: tracing_subscriber::filter::Directive = "bilive_tools=info"
        .parse()
        .unwrap_or_else(|_| tracing::metadata::LevelFilter::INFO.into());
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(directive);

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
