// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Log sink and subscriber trait

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::record::{join_parts, LogRecord, Severity};

/// Receives every record written to a [`LogSink`]
///
/// Implementations must not fail and must not block for long; they run on
/// the caller's task.
pub trait LogSubscriber: Send + Sync {
    fn on_record(&self, record: &LogRecord);
}

impl<F> LogSubscriber for F
where
    F: Fn(&LogRecord) + Send + Sync,
{
    fn on_record(&self, record: &LogRecord) {
        self(record)
    }
}

/// Formats records and fans them out to subscribers
#[derive(Default)]
pub struct LogSink {
    subscribers: RwLock<Vec<Arc<dyn LogSubscriber>>>,
}

impl LogSink {
    /// Create a sink with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber
    pub fn subscribe(&self, subscriber: Arc<dyn LogSubscriber>) {
        self.subscribers.write().push(subscriber);
    }

    /// Number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Write an informational line
    pub fn info(&self, message: impl fmt::Display) {
        self.write(LogRecord::new(Severity::Info, message.to_string()));
    }

    /// Write an error line
    pub fn error(&self, message: impl fmt::Display) {
        self.write(LogRecord::new(Severity::Error, message.to_string()));
    }

    /// Space-join `parts` and write them as one informational line
    pub fn info_parts(&self, parts: &[&dyn fmt::Display]) {
        self.info(join_parts(parts));
    }

    /// Space-join `parts` and write them as one error line
    pub fn error_parts(&self, parts: &[&dyn fmt::Display]) {
        self.error(join_parts(parts));
    }

    fn write(&self, record: LogRecord) {
        // Subscribers may write to this sink again; call them without the lock held.
        let subscribers = self.subscribers.read().clone();
        for subscriber in subscribers {
            subscriber.on_record(&record);
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
