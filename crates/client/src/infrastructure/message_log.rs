//! In-memory message log
//!
//! Keeps every message the client records, timestamped, in arrival order.
//! A UI or CLI reads the history back with [`InMemoryMessageLog::messages`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::ports::{ClockPort, MessageLogPort};

/// A single recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub text: String,
}

pub struct InMemoryMessageLog {
    clock: Arc<dyn ClockPort>,
    entries: Mutex<Vec<LogEntry>>,
}

impl InMemoryMessageLog {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all entries, oldest first.
    pub fn messages(&self) -> Vec<LogEntry> {
        self.entries().clone()
    }

    /// Snapshot of the entry texts, oldest first.
    pub fn texts(&self) -> Vec<String> {
        self.entries().iter().map(|e| e.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    // A panicking writer cannot leave a half-pushed entry behind, so a
    // poisoned lock still guards a consistent Vec.
    fn entries(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageLogPort for InMemoryMessageLog {
    fn add(&self, message: &str) {
        let mut entries = self.entries();
        // Stamp under the lock so timestamps never go backwards along the log.
        let at = self.clock.now();
        entries.push(LogEntry {
            at,
            text: message.to_string(),
        });
        tracing::debug!(message, "message logged");
    }
}
