//! # Session Module - Replay Session Coordination
//!
//! This module provides the high-level interface for replaying a recorded typing session.
//! A [`ReplaySession`] owns the validated recording, every precomputed timeline, and the
//! single mutable [`PlaybackPosition`]. Every change of position (a clock tick or a seek)
//! is followed by a refresh that recomputes the clean index, the display diff and the live
//! statistics.
//!
//! ## Refresh Flow
//!
#![doc = simple_mermaid::mermaid!("../diagrams/refresh_flow.mmd")]
//!
//! ## Usage Examples
//!
//! ### Driving playback
//!
//! ```rust
//! use rewind::{ReplayData, ReplaySession, RecordedAction};
//!
//! let data = ReplayData {
//!     quote: "hi".to_string(),
//!     actions: vec![RecordedAction::new("h", 200.0), RecordedAction::new("hi", 100.0)],
//!     delays: vec![200.0, 100.0],
//!     raw_delays: vec![200.0, 100.0],
//!     graph: None,
//! };
//!
//! let mut session = ReplaySession::new(data).unwrap();
//! assert!(session.start());
//!
//! // The host calls tick once per frame, until it returns false
//! assert!(session.tick(0.0));
//! assert!(session.tick(250.0));
//! assert_eq!(session.position().action_index, 1);
//! assert!(!session.tick(400.0));
//! assert!(session.is_at_end());
//! ```
//!
//! ### Seeking
//!
//! ```rust
//! use rewind::{ReplayData, ReplaySession, RecordedAction};
//!
//! let data = ReplayData {
//!     quote: "cat".to_string(),
//!     actions: vec![
//!         RecordedAction::new("c", 100.0),
//!         RecordedAction::new("cx", 100.0).with_typo("cat"),
//!         RecordedAction::new("ca", 100.0),
//!     ],
//!     delays: vec![100.0, 200.0, 100.0],
//!     raw_delays: vec![100.0, 100.0, 100.0],
//!     graph: None,
//! };
//!
//! let mut session = ReplaySession::new(data).unwrap();
//! session.seek_to_char(2);
//! assert_eq!(session.position().action_index, 3);
//! assert_eq!(session.position().clean_index, 2);
//! ```

use tracing::{debug, info};

use crate::clock::PlaybackClock;
use crate::mistakes::mistakes;
use crate::stats::Moment;
use crate::{
    ActionLog, Configuration, DisplayUpdate, FrameStats, LiveStats, MalformedLog, Millis,
    Mistake, PlaybackPosition, PlaybackState, ReferenceText, ReplayData, Segmentation, Speed,
    TimeBase, Timeline,
};

/// A loaded, validated recording together with its playback state
///
/// # Performance
///
/// - Construction: O(N + M) for N characters and M actions
/// - Ticks: O(k) for k consumed actions, plus one refresh
/// - Refresh: O(length of the applied action's input)
/// - Character seeks: O(M) scans over the log
///
/// # Thread Safety
///
/// A session is meant to be driven from a single thread. All mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    pub(crate) text: ReferenceText,
    pub(crate) log: ActionLog,
    pub(crate) timeline: Timeline,
    pub(crate) segmentation: Option<Segmentation>,
    pub(crate) mistakes: Vec<Mistake>,
    pub(crate) position: PlaybackPosition,
    pub(crate) clock: PlaybackClock,
    pub(crate) config: Configuration,
    pub(crate) time_base: TimeBase,
    stats: LiveStats,
    last_update: DisplayUpdate,
    /// Clean index and caret as of the last `take_update`
    rendered: Option<(usize, Option<usize>)>,
}

impl ReplaySession {
    /// Load a recording with the default configuration
    pub fn new(data: ReplayData) -> Result<Self, MalformedLog> {
        Self::with_configuration(data, Configuration::default())
    }

    /// Load a recording.
    ///
    /// Fails if the recording is malformed: an empty text, delay timelines that don't have
    /// one entry per character, invalid delays or time deltas, or segments that don't cover
    /// the text. A failed load never produces a playable session.
    pub fn with_configuration(
        data: ReplayData,
        config: Configuration,
    ) -> Result<Self, MalformedLog> {
        let ReplayData {
            quote,
            actions,
            delays,
            raw_delays,
            graph,
        } = data;

        let text = ReferenceText::new(&quote)?;
        let timeline = Timeline::new(text.len(), &delays, &raw_delays)?;
        let log = ActionLog::new(actions)?;

        let segmentation = match graph {
            Some(graph) => Some(Segmentation::new(graph, text.len())?),
            None if config.segment_fallback => {
                Some(Segmentation::from_delays(&quote, &delays, &raw_delays)?)
            }
            None => None,
        };

        let mistakes = mistakes(&log);

        info!(
            characters = text.len(),
            actions = log.len(),
            segments = segmentation.as_ref().map_or(0, Segmentation::len),
            mistakes = mistakes.len(),
            "Loaded replay"
        );

        let time_base = config.time_base;
        let mut session = Self {
            text,
            log,
            timeline,
            segmentation,
            mistakes,
            position: PlaybackPosition::new(config.speed),
            clock: PlaybackClock::default(),
            config,
            time_base,
            stats: LiveStats::default(),
            last_update: DisplayUpdate::default(),
            rendered: None,
        };
        session.refresh();

        Ok(session)
    }

    pub fn text(&self) -> &ReferenceText {
        &self.text
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Segment statistics, if the recording came with (or computed) any
    pub fn segmentation(&self) -> Option<&Segmentation> {
        self.segmentation.as_ref()
    }

    pub fn mistakes(&self) -> &[Mistake] {
        &self.mistakes
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn position(&self) -> &PlaybackPosition {
        &self.position
    }

    /// Live statistics at the current position
    pub fn stats(&self) -> &LiveStats {
        &self.stats
    }

    /// What the most recent refresh changed
    pub fn last_update(&self) -> &DisplayUpdate {
        &self.last_update
    }

    /// Everything that changed since the previous call, coalesced into a single diff.
    ///
    /// The first call reports the whole current state (relative to nothing typed and no caret).
    pub fn take_update(&mut self) -> DisplayUpdate {
        let (clean_index, caret_index) = self.rendered.unwrap_or((0, None));
        self.rendered = Some((self.position.clean_index, self.position.caret_index));
        DisplayUpdate::between(clean_index, self.position.clean_index, caret_index)
    }

    pub fn time_base(&self) -> TimeBase {
        self.time_base
    }

    pub fn state(&self) -> PlaybackState {
        self.position.state()
    }

    /// True once every action has been applied
    pub fn is_at_end(&self) -> bool {
        self.position.action_index >= self.log.len()
    }

    /// The typed buffer at the current position
    pub fn current_input(&self) -> &[char] {
        self.log
            .applied(self.position.action_index)
            .map(|action| action.input.as_slice())
            .unwrap_or_default()
    }

    /// The typed buffer split into its clean prefix and the typo tail after it
    pub fn raw_view(&self) -> (&[char], &[char]) {
        self.text.split_input(self.current_input())
    }

    /// Character index and snapshot with the highest WPM in the given time base
    pub fn peak(&self, base: TimeBase) -> (usize, FrameStats) {
        let index = self.timeline.peak_index(base);
        let frame = self
            .timeline
            .frames(base)
            .get(index)
            .copied()
            .unwrap_or_default();
        (index, frame)
    }

    /// Recompute the clean index, the display diff and the statistics for the current position
    pub(crate) fn refresh(&mut self) {
        let applied = self.log.applied(self.position.action_index);
        let clean_index = applied
            .map(|action| self.text.clean_prefix_len(&action.input))
            .unwrap_or(0);
        let action_timestamp = applied.map(|action| action.timestamp).unwrap_or(0.0);

        let position = &mut self.position;
        self.last_update =
            DisplayUpdate::between(position.last_clean_index, clean_index, position.caret_index);

        position.clean_index = clean_index;
        position.caret_index = Some(clean_index);
        position.last_clean_index = clean_index;

        // Once the log is exhausted, a dangling frame remainder must not inflate the final stats
        let at_end = position.action_index >= self.log.len();
        let partial_time = if at_end {
            0.0
        } else {
            position.accumulated_time * position.speed.multiplier()
        };

        self.stats = LiveStats::compute(
            &self.timeline,
            self.time_base,
            Moment {
                clean_index,
                caret_index: position.caret_index,
                action_timestamp,
                partial_time,
            },
        );
    }
}

// Playback logic
impl ReplaySession {
    /// Start playing. Returns false if the log is already exhausted.
    pub fn start(&mut self) -> bool {
        self.clock.start(&mut self.position, self.log.len())
    }

    pub fn pause(&mut self) {
        self.clock.pause(&mut self.position);
    }

    /// Pause when playing, start when paused. Returns whether playback is now running.
    pub fn toggle_playback(&mut self) -> bool {
        if self.position.is_playing {
            self.pause();
            false
        } else {
            self.start()
        }
    }

    /// Advance playback to `now` (monotonic milliseconds).
    ///
    /// A no-op while paused. Returns whether the host should schedule another frame, which
    /// stops once playback is paused or the log runs out.
    pub fn tick(&mut self, now: Millis) -> bool {
        let Some(consumed) = self.clock.advance(now, &mut self.position, &self.log) else {
            return false;
        };

        self.refresh();

        if !self.position.is_playing {
            debug!(consumed, stats = %self.stats, "Playback finished");
        }

        self.position.is_playing
    }

    /// Change the playback speed. Only delays that are still pending use the new speed.
    pub fn set_speed(&mut self, speed: Speed) {
        self.position.speed = speed;
    }

    pub fn faster(&mut self) -> Speed {
        self.set_speed(self.position.speed.faster());
        self.position.speed
    }

    pub fn slower(&mut self) -> Speed {
        self.set_speed(self.position.speed.slower());
        self.position.speed
    }

    pub fn set_time_base(&mut self, base: TimeBase) {
        self.time_base = base;
        self.refresh();
    }

    pub fn toggle_time_base(&mut self) -> TimeBase {
        self.set_time_base(self.time_base.toggled());
        self.time_base
    }
}
