//! # rewind
//!
//! A library for replaying recorded typing sessions.
//!
//! A recording is a log of keystroke-buffer snapshots ("actions") typed against a
//! fixed reference text, together with per-character delay timelines. [`ReplaySession`]
//! turns that recording into a scrubbable, speed-scalable playback with live
//! statistics (WPM, raw WPM and flow) that are reproducible at any position.
//!
//! ```rust
//! use rewind::{ReplayData, ReplaySession, RecordedAction};
//!
//! let data = ReplayData {
//!     quote: "cat".to_string(),
//!     actions: vec![RecordedAction::new("cat", 300.0)],
//!     delays: vec![100.0, 100.0, 100.0],
//!     raw_delays: vec![100.0, 100.0, 100.0],
//!     graph: None,
//! };
//!
//! let mut session = ReplaySession::new(data).unwrap();
//! session.seek_to_action(1);
//!
//! assert_eq!(session.position().clean_index, 3);
//! assert_eq!(session.stats().wpm, 120.0);
//! ```

pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod log;
pub mod mistakes;
pub mod position;
pub mod seek;
pub mod segments;
pub mod session;
pub mod stats;
pub mod text;
pub mod timeline;

pub use clock::{FrameTimer, PlaybackState, Speed};
pub use config::Configuration;
pub use data::{GraphData, RecordedAction, ReplayData};
pub use error::MalformedLog;
pub use log::{Action, ActionLog};
pub use mistakes::Mistake;
pub use position::{DisplayUpdate, PlaybackPosition};
pub use segments::{BarHeights, Segment, Segmentation};
pub use session::ReplaySession;
pub use stats::LiveStats;
pub use text::ReferenceText;
pub use timeline::{FrameStats, TimeBase, Timeline};

const AVERAGE_WORD_LENGTH: f64 = 5.0;

/// Converts characters per second into words per minute (60 / 5)
pub(crate) const WPM_FACTOR: f64 = 60.0 / AVERAGE_WORD_LENGTH;

// Types for more general type-safety
pub type Millis = f64;
pub type Seconds = f64;

/// Words per minute for `characters` typed over `seconds`.
///
/// Returns 0 when no time has elapsed.
pub(crate) fn wpm(characters: usize, seconds: Seconds) -> f64 {
    if seconds > 0.0 {
        WPM_FACTOR * characters as f64 / seconds
    } else {
        0.0
    }
}
