// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar and the single-value cookie helpers
//!
//! [`CookieJar`] is the store; [`read_value`] and [`build_store`] are the thin
//! adapter the rest of the application uses to read one cookie value or turn
//! a `name=value; name2=value2` login string into a fresh jar.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ToolsConfig;
use crate::error::{Error, Result};

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
    /// Insertion order inside the owning jar
    #[serde(skip)]
    creation_index: u64,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            creation_index: 0,
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set secure flag
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie should be sent to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !domain_matches(&self.domain, host) {
            return false;
        }

        if !url.path().starts_with(&self.path) {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        !self.is_expired()
    }

    /// Parse a Set-Cookie style assignment
    ///
    /// The domain defaults to the URL host when no `Domain` attribute is given.
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name, value.trim());
        cookie.domain = url.host_str().unwrap_or("").to_string();

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let val = val.trim();
                match attr.trim().to_lowercase().as_str() {
                    "domain" => cookie.domain = val.trim_start_matches('.').to_lowercase(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(max_age_expiry(secs));
                        }
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Expiry for a `Max-Age` of `secs`, saturating at the representable range
fn max_age_expiry(secs: i64) -> DateTime<Utc> {
    chrono::Duration::try_seconds(secs)
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(if secs > 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

fn domain_matches(domain: &str, host: &str) -> bool {
    if domain.is_empty() {
        return true;
    }

    let domain = domain.trim_start_matches('.');
    host.eq_ignore_ascii_case(domain) || host.ends_with(&format!(".{}", domain))
}

/// Cookie store capability used by the adapter functions and the transport
pub trait CookieStore: Send + Sync {
    /// All cookies visible to `url`, most specific path first, then oldest first
    fn get_all(&self, url: &Url) -> Vec<Cookie>;

    /// Store one `name=value; Attr=...` assignment made against `url`
    fn set_one(&self, assignment: &str, url: &Url) -> Result<()>;
}

/// Thread-safe cookie storage
#[derive(Debug, Clone)]
pub struct CookieJar {
    /// Cookies stored by domain
    cookies: Arc<DashMap<String, Vec<Cookie>>>,
    counter: Arc<AtomicU64>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(DashMap::new()),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Add a cookie, replacing one with the same name and path
    pub fn add(&self, mut cookie: Cookie) {
        cookie.creation_index = self.counter.fetch_add(1, Ordering::Relaxed);
        let mut entry = self.cookies.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        entry.push(cookie);
    }

    /// Add a cookie from a Set-Cookie header, ignoring ones that do not parse
    pub fn add_from_header(&self, header: &str, url: &Url) {
        if let Err(e) = self.set_one(header, url) {
            tracing::debug!(error = %e, url = %url, "Ignoring Set-Cookie header");
        }
    }

    /// Get Cookie header value for a URL
    pub fn get_cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.get_all(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|c| c.to_header_value())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Remove expired cookies
    fn remove_expired(&self) {
        for mut entry in self.cookies.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieStore for CookieJar {
    fn get_all(&self, url: &Url) -> Vec<Cookie> {
        self.remove_expired();

        let mut result: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|c| c.matches(url))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then(a.creation_index.cmp(&b.creation_index))
        });
        result
    }

    fn set_one(&self, assignment: &str, url: &Url) -> Result<()> {
        let cookie = Cookie::parse(assignment, url)
            .ok_or_else(|| Error::cookie(format!("cannot parse cookie '{}'", assignment.trim())))?;

        let host = url.host_str().unwrap_or("");
        if !domain_matches(&cookie.domain, host) {
            return Err(Error::cookie(format!(
                "cookie domain '{}' does not match host '{}'",
                cookie.domain, host
            )));
        }

        self.add(cookie);
        Ok(())
    }
}

/// Value of the first cookie named `key` visible to `url`, or an empty string
pub fn read_value(store: &dyn CookieStore, key: &str, url: &str) -> String {
    let url = match Url::parse(url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(url, error = %e, "Cannot read cookie for invalid URL");
            return String::new();
        }
    };

    store
        .get_all(&url)
        .into_iter()
        .find(|c| c.name == key)
        .map(|c| c.value)
        .unwrap_or_default()
}

/// Build a fresh jar from a `name=value; name2=value2` string
///
/// Every pair is scoped to the configured cookie domain with path `/`.
/// Pairs the store rejects fail the whole call.
pub fn build_store(cookie_string: &str, config: &ToolsConfig) -> Result<CookieJar> {
    let jar = CookieJar::new();
    if cookie_string.is_empty() {
        return Ok(jar);
    }

    let origin = Url::parse(&config.cookie_origin)?;
    for pair in cookie_string.split(';') {
        let assignment = format!("{}; Domain={}; Path=/", pair, config.cookie_domain);
        jar.set_one(&assignment, &origin)?;
    }

    Ok(jar)
}
