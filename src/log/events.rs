// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Publish/subscribe channel for application events

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::record::{LogRecord, Severity};
use super::sink::LogSubscriber;

/// Events carried by the [`EventBus`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// A formatted informational line was written
    NewLogLine { line: String },
    /// Announcement from elsewhere in the application
    SystemMessage { message: String },
}

/// Event listener callback type
pub type EventCallback = Arc<dyn Fn(&Event) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Synchronous fan-out of [`Event`]s to registered callbacks
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<Vec<(ListenerId, EventCallback)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event
    pub fn subscribe(&self, callback: EventCallback) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, callback));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `event` to every listener on the calling task
    pub fn publish(&self, event: &Event) {
        let listeners: Vec<EventCallback> = self
            .listeners
            .read()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Publishes every informational line as [`Event::NewLogLine`]
#[derive(Debug, Clone)]
pub struct EventForwarder {
    bus: Arc<EventBus>,
}

impl EventForwarder {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }
}

impl LogSubscriber for EventForwarder {
    fn on_record(&self, record: &LogRecord) {
        if record.severity == Severity::Info {
            self.bus.publish(&Event::NewLogLine {
                line: record.line(),
            });
        }
    }
}
