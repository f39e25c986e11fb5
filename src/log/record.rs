// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Log records and their line format

use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Fixed-width local time format used as the line prefix
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Record severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Error,
}

/// One formatted log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub severity: Severity,
    pub timestamp: String,
    pub text: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            timestamp: timestamp(),
            text: text.into(),
        }
    }

    /// `"<timestamp> : <text>"`
    pub fn line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.timestamp, self.text)
    }
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Join message parts with single spaces
pub fn join_parts(parts: &[&dyn fmt::Display]) -> String {
    parts
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
