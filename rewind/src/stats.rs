//! # Stats Module - Live Replay Statistics
//!
//! Computes what the statistics line shows at the current playback position. Only the
//! live WPM depends on the partially elapsed time. Raw WPM is looked up in the
//! precomputed [`Timeline`] tables, so values are identical whether a position was reached
//! by playing forward or by seeking.
//!
//! ## Edge Cases
//!
//! - No elapsed time gives a WPM of 0, never NaN.
//! - Under the adjusted time base, the very first correct character at zero elapsed time
//!   yields `f64::INFINITY` for both WPM and raw WPM. The sentinel is kept as is and
//!   rendered as `Infinity`, never clamped to a large finite number.

use std::fmt;

use crate::{Millis, Seconds, TimeBase, Timeline, wpm};

/// The playback moment statistics are computed for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moment {
    pub clean_index: usize,
    pub caret_index: Option<usize>,
    /// Timestamp of the last applied action
    pub action_timestamp: Millis,
    /// Recording time elapsed since that action, already scaled by the playback speed
    pub partial_time: Millis,
}

/// Statistics at a playback position
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LiveStats {
    pub base: TimeBase,
    /// Seconds shown on the clock
    pub display_time: Seconds,
    pub wpm: f64,
    pub raw_wpm: f64,
    /// Percentage of the elapsed time spent typing correctly
    pub flow: f64,
}

impl LiveStats {
    pub fn compute(timeline: &Timeline, base: TimeBase, moment: Moment) -> Self {
        let Moment {
            clean_index,
            caret_index,
            action_timestamp,
            partial_time,
        } = moment;

        let total_time = action_timestamp + partial_time;
        let raw_wpm = timeline
            .frames(base)
            .get(clean_index)
            .map(|frame| frame.raw_wpm)
            .unwrap_or(0.0);

        let (display_time, wpm, raw_wpm) = match base {
            TimeBase::Unadjusted => {
                let display_time = total_time / 1000.0;
                (display_time, wpm(clean_index, display_time), raw_wpm)
            }
            TimeBase::Adjusted => {
                let display_time = ((total_time - timeline.start_time()) / 1000.0).max(0.0);
                if display_time == 0.0 && caret_index == Some(1) {
                    (display_time, f64::INFINITY, f64::INFINITY)
                } else {
                    let wpm = wpm(clean_index.saturating_sub(1), display_time);
                    (display_time, wpm, raw_wpm)
                }
            }
        };

        Self {
            base,
            display_time,
            wpm,
            raw_wpm,
            flow: flow(timeline, clean_index, action_timestamp),
        }
    }
}

/// Active correct-typing time over the elapsed time, as a percentage
fn flow(timeline: &Timeline, clean_index: usize, action_timestamp: Millis) -> f64 {
    if action_timestamp <= 0.0 {
        return 0.0;
    }

    clean_index
        .checked_sub(1)
        .and_then(|index| timeline.cumulative_raw_times().get(index))
        .map(|raw_time| raw_time / action_timestamp * 100.0)
        .unwrap_or(0.0)
}

/// A rate that prints `Infinity` instead of `inf`
struct Rate(f64);

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            rate if rate == f64::INFINITY => f.write_str("Infinity"),
            rate if rate == f64::NEG_INFINITY => f.write_str("-Infinity"),
            rate => write!(f, "{rate:.2}"),
        }
    }
}

impl fmt::Display for LiveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {:.3}s | WPM: {} | Raw: {} | Flow: {:.1}%",
            self.display_time,
            Rate(self.wpm),
            Rate(self.raw_wpm),
            self.flow
        )
    }
}
