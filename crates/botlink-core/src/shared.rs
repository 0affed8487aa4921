//! Lock-guarded handles for cross-context buffer sharing
//!
//! A transport adapter's receive callback and the application's poll loop
//! run on different execution contexts. Each handle wraps its structure in
//! a single mutex and takes the lock once per operation, so compound steps
//! (the scan-then-remove inside `try_take_frame`) stay atomic.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::FramingConfig;
use crate::errors::BufferError;
use crate::framing::FrameBuffer;
use crate::queue::CommandQueue;

// ----------------------------------------------------------------------------
// Shared Frame Buffer
// ----------------------------------------------------------------------------

/// Clonable handle to a mutex-guarded [`FrameBuffer`]
///
/// Clones address the same buffer. No method holds the lock across a
/// return, so callers can't deadlock themselves by nesting calls.
#[derive(Debug, Clone)]
pub struct SharedFrameBuffer {
    inner: Arc<Mutex<FrameBuffer>>,
}

impl SharedFrameBuffer {
    /// Create a shared buffer from a framing configuration
    pub fn new(config: FramingConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FrameBuffer::new(config))),
        }
    }

    /// Append a chunk; see [`FrameBuffer::append`]
    pub fn append(&self, bytes: &[u8]) -> Result<(), BufferError> {
        self.inner.lock().append(bytes)
    }

    /// Extract the head frame if complete; see [`FrameBuffer::try_take_frame`]
    pub fn try_take_frame(&self) -> Option<Vec<u8>> {
        self.inner.lock().try_take_frame()
    }

    /// Count complete frames without consuming them
    pub fn frame_count(&self) -> usize {
        self.inner.lock().frame_count()
    }

    /// Number of currently buffered bytes
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Free space left in the buffer
    pub fn remaining(&self) -> usize {
        self.inner.lock().remaining()
    }

    /// Copy of the currently buffered bytes
    ///
    /// A borrowed view cannot outlive the lock, so the shared handle hands
    /// out an owned snapshot instead.
    pub fn snapshot(&self) -> Vec<u8> {
        self.inner.lock().as_bytes().to_vec()
    }

    /// Discard all buffered bytes
    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}

// ----------------------------------------------------------------------------
// Shared Command Queue
// ----------------------------------------------------------------------------

/// Clonable handle to a mutex-guarded [`CommandQueue`]
#[derive(Debug, Clone, Default)]
pub struct SharedCommandQueue {
    inner: Arc<Mutex<CommandQueue>>,
}

impl SharedCommandQueue {
    /// Create an empty shared queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the tail
    pub fn push(&self, entry: impl Into<String>) {
        self.inner.lock().push(entry)
    }

    /// Remove and return the oldest entry
    pub fn pop(&self) -> Option<String> {
        self.inner.lock().pop()
    }

    /// Concatenate queued entries; see [`CommandQueue::batch`]
    pub fn batch(&self, clean: bool) -> String {
        self.inner.lock().batch(clean)
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the queue has no entries
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}

// ----------------------------------------------------------------------------
// Link Channel
// ----------------------------------------------------------------------------

/// The per-link buffer pair a transport adapter owns
///
/// Inbound bytes on one side, outbound command text on the other. The two
/// directions share no state; either can be cloned off and handed to its
/// own execution context.
#[derive(Debug, Clone)]
pub struct LinkChannel {
    /// Raw receive path: adapter appends, application polls frames
    pub inbound: SharedFrameBuffer,
    /// Send path: application pushes, adapter drains to the wire
    pub outbound: SharedCommandQueue,
}

impl LinkChannel {
    /// Create both directions of a link from one framing configuration
    pub fn new(config: FramingConfig) -> Self {
        Self {
            inbound: SharedFrameBuffer::new(config),
            outbound: SharedCommandQueue::new(),
        }
    }
}

impl Default for LinkChannel {
    fn default() -> Self {
        Self::new(FramingConfig::default())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
