// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Tools configuration

use std::time::Duration;

/// Capacity of the in-memory log tail
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Domain every cookie built from a cookie string is scoped to
pub const DEFAULT_COOKIE_DOMAIN: &str = "bilibili.com";

/// URL cookie assignments are made against
pub const DEFAULT_COOKIE_ORIGIN: &str = "https://bilibili.com";

/// URL used when reading a single cookie value
pub const DEFAULT_COOKIE_READ_URL: &str = "https://api.live.bilibili.com";

/// Tools configuration
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Maximum number of lines kept in the log tail
    pub log_capacity: usize,
    /// Domain attribute applied by `build_store`
    pub cookie_domain: String,
    /// Origin URL cookie assignments are made against
    pub cookie_origin: String,
    /// Default URL for `read_value`
    pub cookie_read_url: String,
    /// Transport timeout
    pub timeout: Duration,
    /// Maximum redirects the transport follows
    pub max_redirects: usize,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Write log lines to stdout/stderr
    pub echo_to_console: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            cookie_domain: DEFAULT_COOKIE_DOMAIN.to_string(),
            cookie_origin: DEFAULT_COOKIE_ORIGIN.to_string(),
            cookie_read_url: DEFAULT_COOKIE_READ_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            proxy: None,
            echo_to_console: true,
        }
    }
}

impl ToolsConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set log tail capacity
    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Set cookie domain and the origin assignments are made against
    pub fn cookie_scope(mut self, domain: impl Into<String>, origin: impl Into<String>) -> Self {
        self.cookie_domain = domain.into();
        self.cookie_origin = origin.into();
        self
    }

    /// Set default cookie read URL
    pub fn cookie_read_url(mut self, url: impl Into<String>) -> Self {
        self.cookie_read_url = url.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set max redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enable/disable console echo of log lines
    pub fn echo_to_console(mut self, echo: bool) -> Self {
        self.echo_to_console = echo;
        self
    }

    /// Quiet config for tests and embedding: no console output
    pub fn quiet() -> Self {
        Self {
            echo_to_console: false,
            ..Default::default()
        }
    }
}
