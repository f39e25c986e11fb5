// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Application log
//!
//! [`LogSink`] formats one [`LogRecord`] per call and fans it out to its
//! subscribers. The bounded [`LogTail`], the [`ConsoleWriter`] and the
//! [`EventForwarder`] are independent subscribers; any of them can be left
//! out. Internal diagnostics go through `tracing` instead.

mod console;
mod events;
mod record;
mod sink;
mod tail;

pub use console::ConsoleWriter;
pub use events::{Event, EventBus, EventCallback, EventForwarder, ListenerId};
pub use record::{join_parts, timestamp, LogRecord, Severity};
pub use sink::{LogSink, LogSubscriber};
pub use tail::LogTail;
