use std::ops::Deref;

use crate::{MalformedLog, Millis, RecordedAction};

/// One recorded keystroke-buffer snapshot, annotated with its position in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// The full buffer content at this moment
    pub input: Vec<char>,
    /// Milliseconds elapsed since the previous action
    pub time_delta: Millis,
    /// True if `input` is not a correct prefix of the text
    pub typo: bool,
    /// The word being attempted when the typo occurred
    pub target_word: String,
    /// Milliseconds from the start of the session
    pub timestamp: Millis,
}

/// The ordered, immutable log of recorded actions.
///
/// Timestamps are computed exactly once, as a running sum of the time deltas, so they are
/// monotonically non-decreasing across the log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new(recorded: Vec<RecordedAction>) -> Result<Self, MalformedLog> {
        let mut running_time = 0.0;

        let actions = recorded
            .into_iter()
            .enumerate()
            .map(|(index, action)| {
                let RecordedAction {
                    input,
                    time_delta,
                    typo_flag,
                    target_word,
                } = action;

                if !time_delta.is_finite() || time_delta < 0.0 {
                    return Err(MalformedLog::InvalidTimeDelta {
                        index,
                        value: time_delta,
                    });
                }

                running_time += time_delta;

                Ok(Action {
                    input: input.chars().collect(),
                    time_delta,
                    typo: typo_flag,
                    target_word,
                    timestamp: running_time,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { actions })
    }

    /// The action that produced the state at `position`.
    ///
    /// Position `n` is the state after `n` actions have been applied, so this is the action at
    /// `n - 1`, or `None` at the very start of the log.
    pub fn applied(&self, position: usize) -> Option<&Action> {
        position
            .checked_sub(1)
            .and_then(|index| self.actions.get(index))
    }

    /// Timestamp of the state at `position` (0 before the first action)
    pub fn timestamp_at(&self, position: usize) -> Millis {
        self.applied(position)
            .map(|action| action.timestamp)
            .unwrap_or(0.0)
    }

    /// Total recorded duration
    pub fn duration(&self) -> Millis {
        self.timestamp_at(self.actions.len())
    }
}

impl Deref for ActionLog {
    type Target = [Action];

    fn deref(&self) -> &Self::Target {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_timestamps_are_running_sum() {
        let log = ActionLog::new(vec![
            RecordedAction::new("c", 100.0),
            RecordedAction::new("ca", 0.0),
            RecordedAction::new("cat", 250.0),
        ])
        .unwrap();

        let timestamps: Vec<_> = log.iter().map(|action| action.timestamp).collect();
        assert_eq!(timestamps, vec![100.0, 100.0, 350.0]);
        assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(log.duration(), 350.0);
    }

    #[test]
    fn test_applied_action() {
        let log = ActionLog::new(vec![
            RecordedAction::new("c", 100.0),
            RecordedAction::new("ca", 50.0),
        ])
        .unwrap();

        assert!(log.applied(0).is_none());
        assert_eq!(log.applied(1).unwrap().input, vec!['c']);
        assert_eq!(log.applied(2).unwrap().input, vec!['c', 'a']);
        assert!(log.applied(3).is_none());

        assert_eq!(log.timestamp_at(0), 0.0);
        assert_eq!(log.timestamp_at(2), 150.0);
    }

    #[test]
    fn test_rejects_invalid_time_delta() {
        let result = ActionLog::new(vec![
            RecordedAction::new("c", 100.0),
            RecordedAction::new("ca", -1.0),
        ]);
        assert_matches!(result, Err(MalformedLog::InvalidTimeDelta { index: 1, .. }));

        let result = ActionLog::new(vec![RecordedAction::new("c", f64::NAN)]);
        assert_matches!(result, Err(MalformedLog::InvalidTimeDelta { index: 0, .. }));
    }

    #[test]
    fn test_empty_log() {
        let log = ActionLog::new(Vec::new()).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.duration(), 0.0);
    }
}
