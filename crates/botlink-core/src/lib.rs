//! botlink transport core
//!
//! Byte-token framing and outbound command staging for a robot-control
//! client speaking over BLE or a wired serial link. Raw chunks arrive from
//! the transport adapter in arbitrary sizes, accumulate in a
//! [`FrameBuffer`], and come back out as complete delimiter-terminated
//! frames; outbound command text stages in a [`CommandQueue`] until the
//! adapter drains it to the wire. [`shared`] adds the lock-guarded handles
//! for the usual receive-callback/poll-loop split, and [`collector`] the
//! quiet-window batching of streamed feedback.
//!
//! Frames are opaque: the robot's command vocabulary lives above this
//! crate, the physical link below it.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod collector;
pub mod config;
pub mod convert;
pub mod errors;
pub mod framing;
pub mod queue;
pub mod shared;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use collector::{normalize_feedback, FeedbackCollector};
pub use config::{CollectorConfig, Delimiter, DelimiterMode, FramingConfig, DEFAULT_CAPACITY};
pub use errors::{BufferError, ConfigError, ConvertError, LinkError, Result};
pub use framing::FrameBuffer;
pub use queue::CommandQueue;
pub use shared::{LinkChannel, SharedCommandQueue, SharedFrameBuffer};
