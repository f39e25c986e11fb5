// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Bounded in-memory tail of informational lines

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::record::{LogRecord, Severity};
use super::sink::LogSubscriber;

/// Most recent informational lines, oldest first
///
/// Error records are ignored. The newest line is appended first and the
/// oldest lines are then dropped, all under one lock, so readers never see
/// more than `capacity` entries.
#[derive(Debug)]
pub struct LogTail {
    capacity: usize,
    lines: Mutex<VecDeque<String>>,
}

impl LogTail {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: Mutex::new(VecDeque::with_capacity(capacity.saturating_add(1))),
        }
    }

    pub fn push(&self, line: String) {
        let mut lines = self.lines.lock();
        lines.push_back(line);
        while lines.len() > self.capacity {
            lines.pop_front();
        }
    }

    /// Snapshot of the buffered lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().cloned().collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl LogSubscriber for LogTail {
    fn on_record(&self, record: &LogRecord) {
        if record.severity == Severity::Info {
            self.push(record.line());
        }
    }
}
