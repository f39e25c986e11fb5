// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-platform header presets
//!
//! Each [`Platform`] maps to a fixed header set that makes requests look like
//! they come from that client. The mapping is total: anything that is not
//! recognised falls through to the desktop browser preset.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{
    ANDROID_USER_AGENT, DESKTOP_USER_AGENT, LIVE_ORIGIN, WEBVIEW_REQUESTED_WITH,
    WEBVIEW_USER_AGENT,
};

/// Simulated client identity used to pick a header preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    /// Desktop browser
    #[default]
    #[serde(rename = "PC")]
    Pc,
    /// Mobile app
    Android,
    /// Browser embedded in the mobile app
    WebView,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::Android => "Android",
            Platform::WebView => "WebView",
        }
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        match s {
            "Android" => Platform::Android,
            "WebView" => Platform::WebView,
            _ => Platform::Pc,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered header collection
///
/// Insertion order is kept. Names compare ASCII case-insensitively, so a
/// caller's `content-type` replaces a preset's `Content-Type` in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet(Vec<(String, String)>);

impl HeaderSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace a header
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.0.iter().position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(idx).1)
    }

    /// Merge `overrides` on top of `self`; overrides win on collision
    pub fn merge(mut self, overrides: HeaderSet) -> Self {
        for (name, value) in overrides.0 {
            self.insert(name, value);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

impl Serialize for HeaderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeaderSetVisitor;

        impl<'de> Visitor<'de> for HeaderSetVisitor {
            type Value = HeaderSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of header names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HeaderSet, A::Error> {
                let mut set = HeaderSet::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    set.insert(name, value);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(HeaderSetVisitor)
    }
}

/// Header preset for a platform. Pure and total.
pub fn headers_for(platform: Platform) -> HeaderSet {
    match platform {
        Platform::Android => HeaderSet::from_iter([
            ("Connection", "Keep-Alive"),
            ("User-Agent", ANDROID_USER_AGENT),
        ]),
        Platform::WebView => HeaderSet::from_iter([
            ("Accept", "application/json, text/javascript, */*"),
            ("Accept-Language", "zh-CN"),
            ("Connection", "keep-alive"),
            ("Cookie", "l=v"),
            ("Origin", LIVE_ORIGIN),
            ("User-Agent", WEBVIEW_USER_AGENT),
            ("X-Requested-With", WEBVIEW_REQUESTED_WITH),
        ]),
        Platform::Pc => HeaderSet::from_iter([
            ("Accept", "application/json, text/javascript, */*"),
            ("Accept-Language", "zh-CN"),
            ("Connection", "keep-alive"),
            ("Cookie", "l=v"),
            ("DNT", "1"),
            ("Origin", LIVE_ORIGIN),
            ("User-Agent", DESKTOP_USER_AGENT),
        ]),
    }
}
