//! Raw recording data, as supplied by whoever captured the session.
//!
//! These types only describe the shape of the input; nothing here is validated. Validation
//! happens once, in [`ReplaySession::new`](crate::ReplaySession::new).

use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::segments::Segment;

/// Everything needed to replay one recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayData {
    /// The reference text that was typed
    pub quote: String,
    /// Keystroke-buffer snapshots in recording order
    pub actions: Vec<RecordedAction>,
    /// Adjusted delay to reach each character, one entry per character
    pub delays: Vec<Millis>,
    /// Active typing time to reach each character, one entry per character
    pub raw_delays: Vec<Millis>,
    /// Optional pre-partitioned segment statistics
    #[serde(default)]
    pub graph: Option<GraphData>,
}

/// One keystroke-buffer snapshot as recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedAction {
    /// The full buffer content at this moment
    pub input: String,
    /// Milliseconds since the previous action
    pub time_delta: Millis,
    /// True if `input` is not a correct prefix of the text
    #[serde(default)]
    pub typo_flag: bool,
    /// The word being attempted when the typo happened
    #[serde(default)]
    pub target_word: String,
}

impl RecordedAction {
    pub fn new(input: &str, time_delta: Millis) -> Self {
        Self {
            input: input.to_string(),
            time_delta,
            typo_flag: false,
            target_word: String::new(),
        }
    }

    /// Marks the action as a typo made while attempting `word`
    pub fn with_typo(mut self, word: &str) -> Self {
        self.typo_flag = true;
        self.target_word = word.to_string();
        self
    }
}

/// Segment statistics for the overview chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub segments: Vec<Segment>,
    /// Chart ceiling. Defaults to the highest segment value.
    #[serde(default)]
    pub ymax: Option<f64>,
    /// WPM axis ticks. Defaults to 0, 25, ..., 200.
    #[serde(default)]
    pub yticks: Option<Vec<f64>>,
}
