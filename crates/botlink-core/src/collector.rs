//! Inbound feedback normalization and quiet-window batching
//!
//! Robot firmware streams a reply in arbitrary chunks with no end marker
//! of its own; the link is considered done talking once it stays silent
//! for a quiet window, at which point the accumulated chunks flush as one
//! message. Driving the poll on a timer is the host's job; this type only
//! keeps the state.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::CollectorConfig;
use crate::queue::CommandQueue;

// ----------------------------------------------------------------------------
// Normalization
// ----------------------------------------------------------------------------

/// Normalize a raw feedback chunk
///
/// Line endings are dropped, tabs become field separators, doubled
/// separators collapse. Single-pass replacements; a pathological run of
/// separators keeps one doubled pair, same as the original firmware
/// tooling tolerates.
pub fn normalize_feedback(raw: &str) -> String {
    raw.replace("\r\n", "")
        .replace('\n', "")
        .replace('\r', "")
        .replace('\t', ",")
        .replace(",,", ",")
}

// ----------------------------------------------------------------------------
// Feedback Collector
// ----------------------------------------------------------------------------

/// Accumulates normalized feedback chunks and flushes them as one batch
/// once the link has been quiet for the configured window
pub struct FeedbackCollector {
    entries: CommandQueue,
    quiet_window: Duration,
    /// Arrival time of the most recent chunk; `None` between batches
    last_data: Option<Instant>,
}

impl FeedbackCollector {
    /// Create a collector from a configuration
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            entries: CommandQueue::new(),
            quiet_window: config.quiet_window,
            last_data: None,
        }
    }

    /// Accept a raw chunk, stamping its arrival now
    pub fn offer(&mut self, chunk: &str) {
        self.offer_at(chunk, Instant::now());
    }

    /// Accept a raw chunk with an explicit arrival time
    pub fn offer_at(&mut self, chunk: &str, at: Instant) {
        self.entries.push(normalize_feedback(chunk));
        self.last_data = Some(at);
    }

    /// Flush the accumulated batch if the quiet window has elapsed
    ///
    /// `None` while data is still trickling in (or nothing is pending) is
    /// the normal poll result.
    pub fn poll(&mut self) -> Option<String> {
        self.poll_at(Instant::now())
    }

    /// Flush with an explicit current time
    pub fn poll_at(&mut self, now: Instant) -> Option<String> {
        let last = self.last_data?;
        if self.entries.is_empty() {
            return None;
        }
        if now.duration_since(last) < self.quiet_window {
            return None;
        }

        let batched = self.entries.batch(true);
        self.last_data = None;
        debug!(len = batched.len(), "feedback batch flushed");
        Some(batched)
    }

    /// Number of chunks waiting for the quiet window
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Drop any pending chunks without flushing
    pub fn clear(&mut self) {
        self.entries.clear();
        self.last_data = None;
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
