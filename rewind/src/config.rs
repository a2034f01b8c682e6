//! # Configuration Module - Replay Behavior Settings
//!
//! This module provides configuration options for customizing how a
//! [`ReplaySession`](crate::ReplaySession) starts out and how far its coarse seeks jump.
//!
//! ## Usage
//!
//! ```rust
//! use rewind::{Configuration, Speed, TimeBase};
//!
//! // Use default configuration
//! let config = Configuration::default();
//!
//! // Custom configuration
//! let config = Configuration {
//!     time_base: TimeBase::Adjusted,
//!     speed: Speed::Double,
//!     ..Configuration::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::{Speed, TimeBase};

/// Runtime configuration for a replay session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Time base for WPM values
    ///
    /// **Default**: [`TimeBase::Unadjusted`]
    pub time_base: TimeBase,

    /// Initial playback speed
    ///
    /// **Default**: [`Speed::Normal`]
    pub speed: Speed,

    /// Coarse jumps move this fraction of the text length
    ///
    /// **Default**: 0.1
    pub jump_ratio: f64,

    /// Lower bound of a coarse jump, in characters
    ///
    /// **Default**: 25
    pub jump_min: usize,

    /// Upper bound of a coarse jump, in characters
    ///
    /// **Default**: 50
    pub jump_max: usize,

    /// Compute segments from the delay timelines when a recording has none
    ///
    /// **Default**: false
    pub segment_fallback: bool,
}

impl Configuration {
    /// Size of a coarse jump over a text of `text_len` characters.
    ///
    /// The lower bound wins over the upper bound if they are misconfigured.
    ///
    /// ```rust
    /// use rewind::Configuration;
    ///
    /// let config = Configuration::default();
    /// assert_eq!(config.jump_size(100), 25);
    /// assert_eq!(config.jump_size(400), 40);
    /// assert_eq!(config.jump_size(2000), 50);
    /// ```
    pub fn jump_size(&self, text_len: usize) -> usize {
        let scaled = (text_len as f64 * self.jump_ratio).floor().max(0.0) as usize;
        scaled.min(self.jump_max).max(self.jump_min)
    }
}

impl Default for Configuration {
    /// Create configuration with recommended default values
    fn default() -> Self {
        Self {
            time_base: TimeBase::Unadjusted,
            speed: Speed::Normal,
            jump_ratio: 0.1,
            jump_min: 25,
            jump_max: 50,
            segment_fallback: false,
        }
    }
}
