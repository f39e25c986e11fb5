// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Small shared helpers: JSON parsing, hashing and delays

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::Digest;

use crate::error::{Error, Result};
use crate::log::LogSink;

/// Parse `text` as JSON into `T`
///
/// A malformed document is written once to the error path of `log` and
/// returned as [`Error::Serialization`].
pub fn parse_json<T: DeserializeOwned>(log: &LogSink, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        log.error_parts(&[&"JSONparse", &e]);
        Error::from(e)
    })
}

/// Parse `text` as JSON, passing every value through `reviver` first
///
/// The reviver sees values bottom-up with their key (array index for array
/// elements, `""` for the root). Returning `None` drops an object member,
/// or leaves `null` in place of an array element or the root.
pub fn parse_json_with<T, F>(log: &LogSink, text: &str, reviver: F) -> Result<T>
where
    T: DeserializeOwned,
    F: Fn(&str, Value) -> Option<Value>,
{
    let value: Value = parse_json(log, text)?;
    let revived = revive(&reviver, "", value).unwrap_or(Value::Null);
    serde_json::from_value(revived).map_err(|e| {
        log.error_parts(&[&"JSONparse", &e]);
        Error::from(e)
    })
}

fn revive<F>(reviver: &F, key: &str, value: Value) -> Option<Value>
where
    F: Fn(&str, Value) -> Option<Value>,
{
    let value = match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter_map(|(k, v)| revive(reviver, &k, v).map(|v| (k, v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| revive(reviver, &i.to_string(), v).unwrap_or(Value::Null))
                .collect(),
        ),
        other => other,
    };
    reviver(key, value)
}

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        })
    }
}

impl HashAlgorithm {
    /// Lowercase hex digest of `data`
    pub fn hex_digest(self, data: impl AsRef<[u8]>) -> String {
        let data = data.as_ref();
        match self {
            HashAlgorithm::Md5 => hex::encode(md5::Md5::digest(data)),
            HashAlgorithm::Sha1 => hex::encode(sha1::Sha1::digest(data)),
            HashAlgorithm::Sha256 => hex::encode(sha2::Sha256::digest(data)),
            HashAlgorithm::Sha512 => hex::encode(sha2::Sha512::digest(data)),
        }
    }
}

/// One-shot hex digest of `data` under the named algorithm
pub fn hash(algorithm: &str, data: impl AsRef<[u8]>) -> Result<String> {
    Ok(algorithm.parse::<HashAlgorithm>()?.hex_digest(data))
}

/// Value a completed [`sleep`] resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slept;

/// Wait for `duration`
///
/// Yields to already-queued tasks before the timer is armed, so even a zero
/// delay lets them run first. Dropping the future abandons the wait.
pub async fn sleep(duration: Duration) -> Slept {
    tokio::task::yield_now().await;
    tokio::time::sleep(duration).await;
    Slept
}
