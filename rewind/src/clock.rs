//! # Clock Module - Cooperative Playback Scheduling
//!
//! Playback is driven from outside: the host calls
//! [`ReplaySession::tick`](crate::ReplaySession::tick) once per frame with a monotonic
//! timestamp, and the clock consumes as many recorded actions as fit into the elapsed time
//! at the current speed. A tick runs to completion, never blocks, and is a no-op while
//! paused, so stopping playback is just a matter of no longer calling it.
//!
//! ## Playback States
//!
#![doc = simple_mermaid::mermaid!("../diagrams/playback_states.mmd")]
//!
//! ## Speed Changes
//!
//! Leftover time is kept in wall-clock milliseconds and only scaled when it is compared
//! against the next pending delay. Changing speed therefore never rescales delays that were
//! already consumed, and a mid-playback change can't make the position jump or skip.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};
use web_time::Instant;

use crate::{ActionLog, Millis, PlaybackPosition};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// The discrete set of playback speeds, slowest first
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum Speed {
    #[strum(serialize = "quarter", serialize = "0.25", to_string = "0.25x")]
    Quarter,
    #[strum(serialize = "half", serialize = "0.5", to_string = "0.5x")]
    Half,
    #[default]
    #[strum(serialize = "normal", serialize = "1", to_string = "1x")]
    Normal,
    #[strum(serialize = "double", serialize = "2", to_string = "2x")]
    Double,
}

impl Speed {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Quarter => 0.25,
            Self::Half => 0.5,
            Self::Normal => 1.0,
            Self::Double => 2.0,
        }
    }

    /// The next faster speed, or `self` if already the fastest
    pub fn faster(self) -> Self {
        Self::iter().find(|speed| *speed > self).unwrap_or(self)
    }

    /// The next slower speed, or `self` if already the slowest
    pub fn slower(self) -> Self {
        Self::iter().rev().find(|speed| *speed < self).unwrap_or(self)
    }

    /// Wall-clock time that a recorded delay takes at this speed
    pub fn scale(self, delay: Millis) -> Millis {
        delay / self.multiplier()
    }
}

/// Monotonic millisecond source for driving [`ReplaySession::tick`](crate::ReplaySession::tick).
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    origin: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds since the timer was created
    pub fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// The `{Paused, Playing}` state machine.
///
/// Holds only the last frame marker. Everything else it touches lives in the shared
/// [`PlaybackPosition`].
#[derive(Debug, Default, Clone)]
pub(crate) struct PlaybackClock {
    last_frame: Option<Millis>,
}

impl PlaybackClock {
    /// Start playing. Returns false (and does nothing) at the end of the log.
    pub fn start(&mut self, position: &mut PlaybackPosition, log_len: usize) -> bool {
        if position.action_index >= log_len {
            return false;
        }

        position.is_playing = true;
        // The first tick after starting must not see the time spent paused
        self.last_frame = None;
        true
    }

    pub fn pause(&mut self, position: &mut PlaybackPosition) {
        position.is_playing = false;
    }

    /// Consume the actions that fit into the time since the last frame.
    ///
    /// Returns how many actions were consumed, or `None` if paused (in which case nothing was
    /// touched).
    pub fn advance(
        &mut self,
        now: Millis,
        position: &mut PlaybackPosition,
        log: &ActionLog,
    ) -> Option<usize> {
        if !position.is_playing {
            return None;
        }

        let delta = self
            .last_frame
            .map(|last_frame| (now - last_frame).max(0.0))
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        position.accumulated_time += delta;

        let mut consumed = 0;
        while let Some(action) = log.get(position.action_index) {
            let delay = position.speed.scale(action.time_delta);
            if position.accumulated_time < delay {
                break;
            }

            position.accumulated_time -= delay;
            position.action_index += 1;
            consumed += 1;
        }

        if position.action_index >= log.len() {
            self.pause(position);
        }

        Some(consumed)
    }
}
