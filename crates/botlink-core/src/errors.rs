//! Error types for the botlink transport core
//!
//! Every condition in this layer is recoverable and reported as a value: a
//! rejected append, a failed UTF-8 decode, an invalid configuration. "No
//! frame yet" and "queue empty" are not errors at all; they surface as
//! `None` from the polling calls.

// ----------------------------------------------------------------------------
// Buffer Errors
// ----------------------------------------------------------------------------

/// Errors raised by the inbound frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// The whole chunk was rejected; the buffer is unchanged
    #[error("append of {requested} bytes exceeds remaining capacity ({remaining} of {capacity} free)")]
    Overflow {
        requested: usize,
        remaining: usize,
        capacity: usize,
    },
}

// ----------------------------------------------------------------------------
// Conversion Errors
// ----------------------------------------------------------------------------

/// Errors raised at the text/byte conversion seam
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("received bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] core::str::Utf8Error),
}

// ----------------------------------------------------------------------------
// Configuration Errors
// ----------------------------------------------------------------------------

/// Errors raised by configuration validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("delimiter must not be empty")]
    EmptyDelimiter,
    #[error("capacity {capacity} cannot hold a single {delimiter_len}-byte delimiter")]
    CapacityTooSmall {
        capacity: usize,
        delimiter_len: usize,
    },
    #[error("quiet window must be non-zero")]
    ZeroQuietWindow,
}

// ----------------------------------------------------------------------------
// Unified Error Type
// ----------------------------------------------------------------------------

/// Unified error type for the botlink core
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LinkError {
    /// Create an overflow error
    pub fn overflow(requested: usize, remaining: usize, capacity: usize) -> Self {
        LinkError::Buffer(BufferError::Overflow {
            requested,
            remaining,
            capacity,
        })
    }
}

pub type Result<T> = core::result::Result<T, LinkError>;
