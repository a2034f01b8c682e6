use std::ops::Range;

use crate::{Millis, PlaybackState, Speed};

/// The single mutable piece of replay state.
///
/// Only the playback clock and the seek operations of
/// [`ReplaySession`](crate::ReplaySession) change it. Renderers read it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackPosition {
    /// How many actions of the log have been applied (`0..=M`)
    pub action_index: usize,
    /// Length of the correct prefix of the last applied action (`0..=N`)
    pub clean_index: usize,
    /// `clean_index` as of the previous refresh
    pub last_clean_index: usize,
    /// The character the caret marker is on. `None` until the first refresh.
    pub caret_index: Option<usize>,
    /// Wall-clock milliseconds not yet consumed by an action
    pub accumulated_time: Millis,
    pub is_playing: bool,
    pub speed: Speed,
}

impl PlaybackPosition {
    pub fn new(speed: Speed) -> Self {
        Self {
            action_index: 0,
            clean_index: 0,
            last_clean_index: 0,
            caret_index: None,
            accumulated_time: 0.0,
            is_playing: false,
            speed,
        }
    }

    pub const fn state(&self) -> PlaybackState {
        if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }
}

impl Default for PlaybackPosition {
    fn default() -> Self {
        Self::new(Speed::default())
    }
}

/// What changed on screen during the last refresh.
///
/// Lets a renderer restyle only the characters whose "typed" state flipped, instead of
/// redrawing the whole text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    /// Characters that became correctly typed
    pub typed: Option<Range<usize>>,
    /// Characters that stopped being correctly typed (the typist backspaced past them)
    pub untyped: Option<Range<usize>>,
    /// The caret moved from the first position (if it was placed) to the second
    pub caret_moved: Option<(Option<usize>, usize)>,
}

impl DisplayUpdate {
    /// Diff between two clean indices, with the caret moving to `clean_index`
    pub fn between(last_clean_index: usize, clean_index: usize, caret: Option<usize>) -> Self {
        let typed = (clean_index > last_clean_index).then(|| last_clean_index..clean_index);
        let untyped = (clean_index < last_clean_index).then(|| clean_index..last_clean_index);
        let caret_moved = (caret != Some(clean_index)).then_some((caret, clean_index));

        Self {
            typed,
            untyped,
            caret_moved,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.typed.is_none() && self.untyped.is_none() && self.caret_moved.is_none()
    }
}
