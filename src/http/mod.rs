// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the shared tools
//!
//! Normalizes request options, applies per-platform header presets and
//! hands the canonical request to a [`Transport`]. Cookies live in a
//! [`CookieJar`] that callers own and attach per request.

mod client;
mod cookie;
mod preset;
mod request;
mod response;
mod transport;

pub use client::HttpClient;
pub use cookie::{build_store, read_value, Cookie, CookieJar, CookieStore};
pub use preset::{headers_for, HeaderSet, Platform};
pub use request::{LegacyOptions, RequestOptions, RequestShape, ResponseType};
pub use response::{Body, RequestResult, Response};
pub use transport::{ReqwestTransport, Transport, TransportRequest};

/// Desktop browser user agent
pub const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/68.0.3440.106 Safari/537.36";

/// Mobile app user agent
pub const ANDROID_USER_AGENT: &str = "Mozilla/5.0 BiliDroid/5.43.1 (bbcallen@gmail.com)";

/// In-app browser user agent
pub const WEBVIEW_USER_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 8.0.0; G8142 Build/47.1.A.12.270; wv) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/68.0.3440.91 Mobile Safari/537.36 BiliApp/5300000";

/// `X-Requested-With` marker sent by the in-app browser
pub const WEBVIEW_REQUESTED_WITH: &str = "tv.danmaku.bili";

/// Origin presented by browser presets
pub const LIVE_ORIGIN: &str = "https://live.bilibili.com";

/// Content type injected into POST requests that do not set one
pub const DEFAULT_FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const COOKIE: &str = "Cookie";
    pub const SET_COOKIE: &str = "set-cookie";
}
