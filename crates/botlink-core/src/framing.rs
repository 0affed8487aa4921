//! Inbound byte accumulation and frame extraction
//!
//! Raw chunks from the transport arrive in arbitrary sizes with no
//! relation to message boundaries; a [`FrameBuffer`] absorbs them and
//! yields complete delimiter-terminated frames one at a time. Frames are
//! opaque byte spans; interpreting them is the application's business.

use core::cmp;
use core::fmt;

use tracing::{debug, trace, warn};

use crate::config::{Delimiter, DelimiterMode, FramingConfig};
use crate::errors::BufferError;

/// How many head bytes the `Debug` impl renders as hex
const DEBUG_PREVIEW_BYTES: usize = 16;

// ----------------------------------------------------------------------------
// Frame Buffer
// ----------------------------------------------------------------------------

/// Fixed-capacity accumulator for the inbound byte stream
///
/// Bytes live in arrival order; partial frames persist across any number
/// of appends until their delimiter shows up. An append that would exceed
/// capacity is rejected whole: the error carries the sizes involved and
/// the buffer keeps exactly the bytes it already had.
pub struct FrameBuffer {
    /// Appended-and-not-yet-consumed bytes, arrival order
    storage: Vec<u8>,
    capacity: usize,
    delimiter: Delimiter,
    mode: DelimiterMode,
    /// Head bytes already known to contain no delimiter start; failed
    /// scans resume here instead of rescanning from zero
    scanned: usize,
}

impl FrameBuffer {
    /// Create a buffer from a framing configuration
    ///
    /// Always succeeds. The configuration is taken as validated; with an
    /// empty delimiter the buffer accepts bytes but never completes a
    /// frame (see [`FramingConfig::validate`]).
    pub fn new(config: FramingConfig) -> Self {
        Self {
            // reserved up front: appends are bounded by `capacity`, so
            // `storage` never reallocates
            storage: Vec::with_capacity(config.capacity),
            capacity: config.capacity,
            delimiter: config.delimiter,
            mode: config.delimiter_mode,
            scanned: 0,
        }
    }

    /// Create a buffer with the given capacity and default framing
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(FramingConfig::default().with_capacity(capacity))
    }

    /// Maximum number of buffered bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of currently buffered bytes
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Free space left before appends start bouncing
    pub fn remaining(&self) -> usize {
        self.capacity - self.storage.len()
    }

    /// Read-only view of the buffered bytes; consumes nothing
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }

    /// The configured frame delimiter
    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }

    /// Append a chunk to the tail of the buffer
    ///
    /// An empty chunk is a no-op. A chunk larger than the remaining room
    /// is rejected in full and the buffer is left untouched.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.is_empty() {
            return Ok(());
        }

        let remaining = self.remaining();
        if bytes.len() > remaining {
            warn!(
                requested = bytes.len(),
                remaining,
                capacity = self.capacity,
                "frame buffer full, chunk rejected"
            );
            return Err(BufferError::Overflow {
                requested: bytes.len(),
                remaining,
                capacity: self.capacity,
            });
        }

        self.storage.extend_from_slice(bytes);
        trace!(
            appended = bytes.len(),
            buffered = self.storage.len(),
            "chunk appended"
        );
        Ok(())
    }

    /// Count the complete frames currently buffered; consumes nothing
    ///
    /// Non-overlapping occurrences of the delimiter, full scan each call.
    pub fn frame_count(&self) -> usize {
        let mut count = 0;
        let mut from = 0;
        while let Some(pos) = self.find_delimiter(from) {
            count += 1;
            from = pos + self.delimiter.len();
        }
        count
    }

    /// Extract the frame at the head of the buffer, if one is complete
    ///
    /// On a hit, the frame and its delimiter leave the buffer in one step;
    /// whether the returned bytes include the delimiter follows the
    /// configured [`DelimiterMode`]. `None` means more data is needed and
    /// the buffered bytes stay exactly where they were. A delimiter at the
    /// head yields an empty frame, which is distinct from `None`.
    pub fn try_take_frame(&mut self) -> Option<Vec<u8>> {
        match self.find_delimiter(self.scanned) {
            Some(pos) => {
                let end = pos + self.delimiter.len();
                let cut = match self.mode {
                    DelimiterMode::Strip => pos,
                    DelimiterMode::Retain => end,
                };
                let frame = self.storage[..cut].to_vec();
                self.storage.drain(..end);
                self.scanned = 0;
                debug!(
                    frame_len = frame.len(),
                    buffered = self.storage.len(),
                    "frame extracted"
                );
                Some(frame)
            }
            None => {
                // everything but a possible delimiter prefix at the tail
                // is now known clean
                self.scanned = self
                    .storage
                    .len()
                    .saturating_sub(self.delimiter.len().saturating_sub(1));
                None
            }
        }
    }

    /// Discard all buffered bytes; the capacity reservation stays
    pub fn clear(&mut self) {
        self.storage.clear();
        self.scanned = 0;
        trace!("frame buffer cleared");
    }

    /// First delimiter occurrence starting at or after `from`
    fn find_delimiter(&self, from: usize) -> Option<usize> {
        if self.delimiter.is_empty() {
            return None;
        }
        self.storage
            .get(from..)?
            .windows(self.delimiter.len())
            .position(|window| window == &self.delimiter[..])
            .map(|pos| pos + from)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(FramingConfig::default())
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = cmp::min(self.storage.len(), DEBUG_PREVIEW_BYTES);
        f.debug_struct("FrameBuffer")
            .field("len", &self.storage.len())
            .field("capacity", &self.capacity)
            .field("frames", &self.frame_count())
            .field("head", &hex::encode(&self.storage[..preview]))
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DelimiterMode;

    fn newline_buffer(capacity: usize) -> FrameBuffer {
        FrameBuffer::new(FramingConfig::default().with_capacity(capacity))
    }

    #[test]
    fn test_serial_reply_roundtrip() {
        // capacity=16, delimiter="\n": "AT+" then "OK\n" frames as "AT+OK"
        let mut buffer = newline_buffer(16);
        buffer.append(b"AT+").unwrap();
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.try_take_frame(), None);

        buffer.append(b"OK\n").unwrap();
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.try_take_frame(), Some(b"AT+OK".to_vec()));
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.try_take_frame(), None);
    }

    #[test]
    fn test_empty_append_is_noop() {
        let mut buffer = newline_buffer(8);
        buffer.append(b"").unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.remaining(), 8);
    }

    #[test]
    fn test_overflow_rejects_whole_chunk() {
        let mut buffer = newline_buffer(8);
        buffer.append(b"12345").unwrap();

        let err = buffer.append(b"6789").unwrap_err();
        assert_eq!(
            err,
            BufferError::Overflow {
                requested: 4,
                remaining: 3,
                capacity: 8,
            }
        );

        // the reject left the buffer exactly as it was
        assert_eq!(buffer.as_bytes(), b"12345");
        assert_eq!(buffer.remaining(), 3);

        // a chunk that fits is still welcome afterwards
        buffer.append(b"6\n").unwrap();
        assert_eq!(buffer.try_take_frame(), Some(b"123456".to_vec()));
    }

    #[test]
    fn test_exact_fit_append_succeeds() {
        let mut buffer = newline_buffer(4);
        buffer.append(b"ab\nc").unwrap();
        assert_eq!(buffer.remaining(), 0);
        assert_eq!(buffer.try_take_frame(), Some(b"ab".to_vec()));
        assert_eq!(buffer.as_bytes(), b"c");
    }

    #[test]
    fn test_multiple_frames_in_order() {
        let mut buffer = newline_buffer(32);
        buffer.append(b"one\ntwo\nthree\n").unwrap();
        assert_eq!(buffer.frame_count(), 3);

        assert_eq!(buffer.try_take_frame(), Some(b"one".to_vec()));
        assert_eq!(buffer.try_take_frame(), Some(b"two".to_vec()));
        assert_eq!(buffer.try_take_frame(), Some(b"three".to_vec()));
        assert_eq!(buffer.try_take_frame(), None);
    }

    #[test]
    fn test_zero_length_frame_is_not_none() {
        let mut buffer = newline_buffer(8);
        buffer.append(b"\nx").unwrap();
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.try_take_frame(), Some(Vec::new()));
        assert_eq!(buffer.as_bytes(), b"x");
    }

    #[test]
    fn test_retain_mode_keeps_delimiter() {
        let mut buffer = FrameBuffer::new(
            FramingConfig::default()
                .with_capacity(16)
                .with_delimiter_mode(DelimiterMode::Retain),
        );
        buffer.append(b"m1\nm2\n").unwrap();
        assert_eq!(buffer.try_take_frame(), Some(b"m1\n".to_vec()));
        assert_eq!(buffer.try_take_frame(), Some(b"m2\n".to_vec()));
    }

    #[test]
    fn test_multibyte_delimiter_split_across_appends() {
        let mut buffer = FrameBuffer::new(
            FramingConfig::default()
                .with_capacity(32)
                .with_delimiter(b"\r\n"),
        );

        buffer.append(b"pose=up\r").unwrap();
        assert_eq!(buffer.try_take_frame(), None);
        assert_eq!(buffer.frame_count(), 0);

        buffer.append(b"\nrest").unwrap();
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.try_take_frame(), Some(b"pose=up".to_vec()));
        assert_eq!(buffer.as_bytes(), b"rest");
    }

    #[test]
    fn test_readonly_calls_do_not_mutate() {
        let mut buffer = newline_buffer(16);
        buffer.append(b"partial").unwrap();

        for _ in 0..4 {
            assert_eq!(buffer.frame_count(), 0);
            assert_eq!(buffer.as_bytes(), b"partial");
            assert_eq!(buffer.len(), 7);
            assert_eq!(buffer.remaining(), 9);
        }
    }

    #[test]
    fn test_failed_poll_then_append_still_finds_frame() {
        let mut buffer = newline_buffer(16);
        buffer.append(b"abc").unwrap();
        // failed scans advance the resume offset; the frame must still be
        // found once its delimiter lands
        assert_eq!(buffer.try_take_frame(), None);
        assert_eq!(buffer.try_take_frame(), None);
        buffer.append(b"de\n").unwrap();
        assert_eq!(buffer.try_take_frame(), Some(b"abcde".to_vec()));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut buffer = newline_buffer(16);
        buffer.append(b"a\nb\nleft").unwrap();
        buffer.clear();

        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.remaining(), 16);
        assert_eq!(buffer.try_take_frame(), None);

        // the buffer stays usable after a reset
        buffer.append(b"fresh\n").unwrap();
        assert_eq!(buffer.try_take_frame(), Some(b"fresh".to_vec()));
    }

    #[test]
    fn test_debug_preview_is_bounded() {
        let mut buffer = newline_buffer(64);
        buffer.append(&[0xAB; 40]).unwrap();
        let rendered = format!("{buffer:?}");
        assert!(rendered.contains("len: 40"));
        // 16 preview bytes, two hex chars each
        assert!(rendered.contains(&"ab".repeat(16)));
        assert!(!rendered.contains(&"ab".repeat(17)));
    }
}
