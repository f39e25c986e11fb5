// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Console output for log records

use std::io::{self, Stderr, Stdout, Write};

use parking_lot::Mutex;

use super::record::{LogRecord, Severity};
use super::sink::LogSubscriber;

/// Writes informational lines to one stream and error lines to another
///
/// Defaults to the process's stdout and stderr.
pub struct ConsoleWriter<O = Stdout, E = Stderr> {
    out: Mutex<O>,
    err: Mutex<E>,
}

impl ConsoleWriter {
    /// Writer over the process's standard streams
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Write, E: Write> ConsoleWriter<O, E> {
    /// Writer over arbitrary output and error sinks
    pub fn with_writers(out: O, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// Take back the output and error sinks
    pub fn into_inner(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

impl<O, E> LogSubscriber for ConsoleWriter<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    fn on_record(&self, record: &LogRecord) {
        // A closed pipe must not take the process down with it.
        let _ = match record.severity {
            Severity::Info => writeln!(self.out.lock(), "{}", record),
            Severity::Error => writeln!(self.err.lock(), "{}", record),
        };
    }
}

impl<O, E> std::fmt::Debug for ConsoleWriter<O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleWriter").finish_non_exhaustive()
    }
}
