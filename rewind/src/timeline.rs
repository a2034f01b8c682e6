//! # Timeline Module - Per-Character Delay Precomputation
//!
//! Turns the recorded per-character delays into cumulative times and a table of WPM
//! snapshots, one for every "exactly `i` correct characters typed" state. Everything here
//! is computed once, when a session is loaded, and never mutated afterwards.
//!
//! ## Time Bases
//!
//! Two tables are kept side by side:
//!
//! - **Unadjusted**: the full time to reach character `i`.
//! - **Adjusted**: the first character's delay is treated as reaction time rather than
//!   typing speed, so it is removed from both the elapsed time and the character count.
//!
//! In both tables a state with no elapsed time has a WPM of exactly 0.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{MalformedLog, Millis, Seconds, wpm};

/// Which time base WPM values are computed against.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum TimeBase {
    #[default]
    Unadjusted,
    Adjusted,
}

impl TimeBase {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unadjusted => Self::Adjusted,
            Self::Adjusted => Self::Unadjusted,
        }
    }

    pub const fn is_adjusted(self) -> bool {
        matches!(self, Self::Adjusted)
    }
}

impl From<bool> for TimeBase {
    fn from(adjusted: bool) -> Self {
        if adjusted {
            Self::Adjusted
        } else {
            Self::Unadjusted
        }
    }
}

/// A statistics snapshot for "exactly `i` correct characters typed"
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub elapsed_seconds: Seconds,
    pub wpm: f64,
    pub raw_wpm: f64,
}

/// Precomputed per-character timelines
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    cumulative_times: Vec<Millis>,
    cumulative_raw_times: Vec<Millis>,
    frame_stats: Vec<FrameStats>,
    adjusted_frame_stats: Vec<FrameStats>,
    start_time: Millis,
    start_raw_time: Millis,
}

impl Timeline {
    /// Precompute the timelines for a text of `text_len` characters.
    ///
    /// Both delay sequences must hold exactly one finite, non-negative entry per character.
    pub fn new(
        text_len: usize,
        delays: &[Millis],
        raw_delays: &[Millis],
    ) -> Result<Self, MalformedLog> {
        if delays.len() != text_len {
            return Err(MalformedLog::DelayCount {
                expected: text_len,
                found: delays.len(),
            });
        }

        if raw_delays.len() != text_len {
            return Err(MalformedLog::RawDelayCount {
                expected: text_len,
                found: raw_delays.len(),
            });
        }

        if let Some((index, &value)) = first_invalid(delays) {
            return Err(MalformedLog::InvalidDelay { index, value });
        }

        if let Some((index, &value)) = first_invalid(raw_delays) {
            return Err(MalformedLog::InvalidRawDelay { index, value });
        }

        let cumulative_times = cumulative_sum(delays);
        let cumulative_raw_times = cumulative_sum(raw_delays);
        let start_time = delays.first().copied().unwrap_or(0.0);
        let start_raw_time = raw_delays.first().copied().unwrap_or(0.0);

        let mut frame_stats = Vec::with_capacity(text_len + 1);
        let mut adjusted_frame_stats = Vec::with_capacity(text_len + 1);

        for i in 0..=text_len {
            let (time, raw_time) = match i.checked_sub(1) {
                Some(previous) => (cumulative_times[previous], cumulative_raw_times[previous]),
                None => (0.0, 0.0),
            };

            let elapsed_seconds = time / 1000.0;
            frame_stats.push(FrameStats {
                elapsed_seconds,
                wpm: wpm(i, elapsed_seconds),
                raw_wpm: wpm(i, raw_time / 1000.0),
            });

            // The first character's delay is reaction time, not typing time
            let (adjusted_seconds, adjusted_raw_seconds) = if i > 0 {
                (
                    (time - start_time) / 1000.0,
                    (raw_time - start_raw_time) / 1000.0,
                )
            } else {
                (0.0, 0.0)
            };
            let adjusted_chars = i.saturating_sub(1);
            adjusted_frame_stats.push(FrameStats {
                elapsed_seconds: adjusted_seconds,
                wpm: wpm(adjusted_chars, adjusted_seconds),
                raw_wpm: wpm(adjusted_chars, adjusted_raw_seconds),
            });
        }

        Ok(Self {
            cumulative_times,
            cumulative_raw_times,
            frame_stats,
            adjusted_frame_stats,
            start_time,
            start_raw_time,
        })
    }

    /// Cumulative milliseconds to reach character `i + 1`
    pub fn cumulative_times(&self) -> &[Millis] {
        &self.cumulative_times
    }

    /// Cumulative active typing milliseconds to reach character `i + 1`
    pub fn cumulative_raw_times(&self) -> &[Millis] {
        &self.cumulative_raw_times
    }

    /// The snapshot table for the given time base (length N + 1)
    pub fn frames(&self, base: TimeBase) -> &[FrameStats] {
        match base {
            TimeBase::Unadjusted => &self.frame_stats,
            TimeBase::Adjusted => &self.adjusted_frame_stats,
        }
    }

    /// Delay of the first character, treated as reaction time by the adjusted base
    pub fn start_time(&self) -> Millis {
        self.start_time
    }

    pub fn start_raw_time(&self) -> Millis {
        self.start_raw_time
    }

    /// Character index with the highest WPM.
    ///
    /// Ties resolve to the earliest index, and a table without any positive WPM yields 0.
    pub fn peak_index(&self, base: TimeBase) -> usize {
        let mut peak_index = 0;
        let mut peak_wpm = 0.0;

        for (index, frame) in self.frames(base).iter().enumerate() {
            if frame.wpm > peak_wpm {
                peak_wpm = frame.wpm;
                peak_index = index;
            }
        }

        peak_index
    }
}

fn cumulative_sum(delays: &[Millis]) -> Vec<Millis> {
    delays
        .iter()
        .scan(0.0, |sum, delay| {
            *sum += delay;
            Some(*sum)
        })
        .collect()
}

fn first_invalid(delays: &[Millis]) -> Option<(usize, &Millis)> {
    delays
        .iter()
        .enumerate()
        .find(|(_, delay)| !delay.is_finite() || **delay < 0.0)
}
