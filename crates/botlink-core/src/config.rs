//! Configuration for the botlink transport core
//!
//! Consolidates the tunable parameters of the framing buffer and the
//! feedback collector so a transport adapter configures one struct per
//! link direction.

use core::time::Duration;

use smallvec::SmallVec;

use crate::errors::ConfigError;

// ----------------------------------------------------------------------------
// Delimiter
// ----------------------------------------------------------------------------

/// Inline storage size for delimiter bytes; `\r\n`-style sentinels fit
/// without a heap allocation.
const DELIMITER_INLINE: usize = 4;

/// A frame delimiter: one sentinel byte or a short byte sequence
pub type Delimiter = SmallVec<[u8; DELIMITER_INLINE]>;

/// What `try_take_frame` does with the delimiter it consumed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
pub enum DelimiterMode {
    /// Return the frame without its trailing delimiter
    #[default]
    Strip,
    /// Return the frame with the delimiter still attached
    Retain,
}

// ----------------------------------------------------------------------------
// Framing Configuration
// ----------------------------------------------------------------------------

/// Default buffer capacity in bytes. Robot feedback dumps (calibration
/// tables, sensor printouts) span many BLE notifications; 4 KiB holds a
/// burst of them while still bounding memory per link.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Configuration for an inbound frame buffer
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FramingConfig {
    /// Maximum number of buffered bytes
    pub capacity: usize,
    /// Frame delimiter within the raw stream
    pub delimiter: Delimiter,
    /// Whether extracted frames keep their delimiter
    pub delimiter_mode: DelimiterMode,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            delimiter: Delimiter::from_slice(b"\n"),
            delimiter_mode: DelimiterMode::Strip,
        }
    }
}

impl FramingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the frame delimiter
    pub fn with_delimiter(mut self, delimiter: &[u8]) -> Self {
        self.delimiter = Delimiter::from_slice(delimiter);
        self
    }

    /// Set the delimiter disposition
    pub fn with_delimiter_mode(mut self, mode: DelimiterMode) -> Self {
        self.delimiter_mode = mode;
        self
    }

    /// Small-capacity configuration for tests
    pub fn testing() -> Self {
        Self::default().with_capacity(64)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        if self.capacity < self.delimiter.len() {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.capacity,
                delimiter_len: self.delimiter.len(),
            });
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Collector Configuration
// ----------------------------------------------------------------------------

/// Configuration for the feedback collector
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CollectorConfig {
    /// How long the link must stay silent before buffered feedback flushes
    pub quiet_window: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            // The firmware pauses well under a second between chunks of one
            // reply; a full second of silence means the reply is complete.
            quiet_window: Duration::from_secs(1),
        }
    }
}

impl CollectorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quiet window
    pub fn with_quiet_window(mut self, quiet_window: Duration) -> Self {
        self.quiet_window = quiet_window;
        self
    }

    /// Short-window configuration for tests
    pub fn testing() -> Self {
        Self {
            quiet_window: Duration::from_millis(10),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiet_window.is_zero() {
            return Err(ConfigError::ZeroQuietWindow);
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_framing_config_is_valid() {
        let config = FramingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(&config.delimiter[..], b"\n");
        assert_eq!(config.delimiter_mode, DelimiterMode::Strip);
    }

    #[test]
    fn test_builder_methods() {
        let config = FramingConfig::new()
            .with_capacity(128)
            .with_delimiter(b"\r\n")
            .with_delimiter_mode(DelimiterMode::Retain);

        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, 128);
        assert_eq!(&config.delimiter[..], b"\r\n");
        assert_eq!(config.delimiter_mode, DelimiterMode::Retain);
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let config = FramingConfig::new().with_delimiter(b"");
        assert_eq!(config.validate(), Err(ConfigError::EmptyDelimiter));
    }

    #[test]
    fn test_capacity_smaller_than_delimiter_rejected() {
        let config = FramingConfig::new().with_capacity(1).with_delimiter(b"\r\n");
        assert_eq!(
            config.validate(),
            Err(ConfigError::CapacityTooSmall {
                capacity: 1,
                delimiter_len: 2,
            })
        );
    }

    #[test]
    fn test_collector_config_validation() {
        assert!(CollectorConfig::default().validate().is_ok());
        assert!(CollectorConfig::testing().validate().is_ok());

        let zero = CollectorConfig::new().with_quiet_window(Duration::ZERO);
        assert_eq!(zero.validate(), Err(ConfigError::ZeroQuietWindow));
    }
}
