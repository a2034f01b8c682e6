//! # Seek Module - Random Access Into a Replay
//!
//! Every seek resolves to a single operation, [`ReplaySession::seek_to_action`]: place the
//! position right after some action, drop any partially elapsed time, and refresh. The other
//! seeks only differ in how they pick that action index.
//!
//! Seeks work while playing. Playback simply continues from the new position.
//!
//! ## Granularity
//!
//! | Seek                         | Moves by                                         |
//! |------------------------------|--------------------------------------------------|
//! | `step_action_back/forward`   | one recorded action                              |
//! | `seek_back/forward_one_char` | one change of the clean index                    |
//! | `jump_back/forward`          | a fraction of the text, see [`Configuration`]    |
//! | `seek_to_char`               | to the first action reaching a character         |
//! | `seek_to_segment`            | to the start of a segment                        |
//! | `seek_to_mistake`            | to right after a typo                            |
//!
//! [`Configuration`]: crate::Configuration

use tracing::debug;

use crate::{Action, ReferenceText, ReplaySession, TimeBase};

fn clean_len(text: &ReferenceText, action: &Action) -> usize {
    text.clean_prefix_len(&action.input)
}

/// Position right after the first action whose clean length reaches `target`.
///
/// Falls back to 0 when no action ever gets there.
fn char_target(text: &ReferenceText, log: &[Action], target: usize) -> usize {
    if target == 0 {
        return 0;
    }

    log.iter()
        .position(|action| clean_len(text, action) >= target)
        .map_or(0, |index| index + 1)
}

/// Position of the action that last advanced the clean index, with any typos right
/// before it skipped as well
fn back_target(text: &ReferenceText, log: &[Action], from: usize, clean_index: usize) -> usize {
    let mut target = from;
    while target > 0 {
        target -= 1;
        let previous = &log[target.saturating_sub(1)];
        if clean_len(text, previous) < clean_index {
            break;
        }
    }

    while target > 0 && log[target - 1].typo {
        target -= 1;
    }

    target
}

/// Position right after the next action that grows the clean index, or the end of the log
fn forward_target(text: &ReferenceText, log: &[Action], from: usize, clean_index: usize) -> usize {
    let mut target = from;
    while let Some(action) = log.get(target) {
        target += 1;
        if clean_len(text, action) > clean_index {
            break;
        }
    }

    target
}

impl ReplaySession {
    /// Place the position right after action `index - 1`, clamped to the log.
    ///
    /// Idempotent: seeking to the same index twice leaves the same state as seeking once.
    pub fn seek_to_action(&mut self, index: usize) {
        let index = index.min(self.log.len());
        self.position.action_index = index;
        self.position.accumulated_time = 0.0;
        self.refresh();

        debug!(
            action_index = index,
            clean_index = self.position.clean_index,
            "Seeked"
        );
    }

    /// Seek to the first moment `char_index` characters were correctly typed.
    ///
    /// If the log never gets that far, this seeks to the very start.
    pub fn seek_to_char(&mut self, char_index: usize) {
        let target = char_target(&self.text, &self.log, char_index);
        self.seek_to_action(target);
    }

    /// Seek to where the caret last moved forward, skipping back over typos before it
    pub fn seek_back_one_char(&mut self) {
        let target = back_target(
            &self.text,
            &self.log,
            self.position.action_index,
            self.position.clean_index,
        );
        self.seek_to_action(target);
    }

    /// Seek to right after the next action that grows the clean index
    pub fn seek_forward_one_char(&mut self) {
        let target = forward_target(
            &self.text,
            &self.log,
            self.position.action_index,
            self.position.clean_index,
        );
        self.seek_to_action(target);
    }

    /// Seek to the character with the highest WPM in `base`. Returns that character index.
    pub fn jump_to_peak_wpm(&mut self, base: TimeBase) -> usize {
        let peak = self.timeline.peak_index(base);
        self.seek_to_char(peak);
        peak
    }

    pub fn skip_to_start(&mut self) {
        self.seek_to_action(0);
    }

    pub fn skip_to_end(&mut self) {
        self.seek_to_action(self.log.len());
    }

    /// Step back over exactly one recorded action
    pub fn step_action_back(&mut self) {
        self.seek_to_action(self.position.action_index.saturating_sub(1));
    }

    /// Step forward over exactly one recorded action
    pub fn step_action_forward(&mut self) {
        self.seek_to_action(self.position.action_index + 1);
    }

    /// Jump back by [`Configuration::jump_size`](crate::Configuration::jump_size) characters
    pub fn jump_back(&mut self) {
        let size = self.config.jump_size(self.text.len());
        self.seek_to_char(self.position.clean_index.saturating_sub(size));
    }

    /// Jump forward by [`Configuration::jump_size`](crate::Configuration::jump_size) characters,
    /// stopping at the end of the text
    pub fn jump_forward(&mut self) {
        let size = self.config.jump_size(self.text.len());
        let target = (self.position.clean_index + size).min(self.text.len());
        self.seek_to_char(target);
    }

    /// Seek for a click on character `char_index`. A click on the right half of a character
    /// seeks past it.
    pub fn seek_to_click(&mut self, char_index: usize, right_half: bool) {
        self.seek_to_char(char_index + usize::from(right_half));
    }

    /// Seek to the start of segment `index`. Returns false if there is no such segment.
    pub fn seek_to_segment(&mut self, index: usize) -> bool {
        let Some(offset) = self
            .segmentation
            .as_ref()
            .and_then(|segmentation| segmentation.char_offset_for_segment(index))
        else {
            return false;
        };

        self.seek_to_char(offset);
        true
    }

    /// Seek to right after the action that started mistake `index`. Returns false if there is
    /// no such mistake.
    pub fn seek_to_mistake(&mut self, index: usize) -> bool {
        let Some(target) = self.mistakes.get(index).map(|mistake| mistake.seek_target()) else {
            return false;
        };

        self.seek_to_action(target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphData, RecordedAction, ReplayData, Segment};

    fn session(quote: &str, actions: Vec<RecordedAction>) -> ReplaySession {
        let len = quote.chars().count();
        ReplaySession::new(ReplayData {
            quote: quote.to_string(),
            actions,
            delays: vec![100.0; len],
            raw_delays: vec![100.0; len],
            graph: None,
        })
        .unwrap()
    }

    /// Types "the cat" with a typo on the second word that takes two backspaces to fix
    fn with_typos() -> ReplaySession {
        session(
            "the cat",
            vec![
                RecordedAction::new("t", 100.0),
                RecordedAction::new("th", 100.0),
                RecordedAction::new("the", 100.0),
                RecordedAction::new("the ", 100.0),
                RecordedAction::new("the c", 100.0),
                RecordedAction::new("the cx", 100.0).with_typo("cat"),
                RecordedAction::new("the cxz", 100.0).with_typo("cat"),
                RecordedAction::new("the cx", 100.0).with_typo("cat"),
                RecordedAction::new("the c", 100.0),
                RecordedAction::new("the ca", 100.0),
                RecordedAction::new("the cat", 100.0),
            ],
        )
    }

    #[test]
    fn test_seek_to_action_is_idempotent() {
        let mut session = with_typos();
        session.seek_to_action(6);
        let once = (session.position().clone(), *session.stats());

        session.seek_to_action(6);
        assert_eq!(session.position(), &once.0);
        assert_eq!(session.stats(), &once.1);
        assert_eq!(session.position().clean_index, 5);
        assert_eq!(session.position().caret_index, Some(5));
    }

    #[test]
    fn test_seek_to_action_clamps_and_drops_partial_time() {
        let mut session = with_typos();
        session.start();
        session.tick(0.0);
        session.tick(150.0);
        assert_eq!(session.position().accumulated_time, 50.0);

        session.seek_to_action(100);
        assert_eq!(session.position().action_index, 11);
        assert_eq!(session.position().accumulated_time, 0.0);
        assert!(session.is_at_end());
    }

    #[test]
    fn test_seek_to_char() {
        let mut session = session(
            "cat",
            vec![
                RecordedAction::new("c", 100.0),
                RecordedAction::new("cx", 100.0).with_typo("cat"),
                RecordedAction::new("ca", 100.0),
            ],
        );

        session.seek_to_char(2);
        assert_eq!(session.position().action_index, 3);
        assert_eq!(session.position().clean_index, 2);

        session.seek_to_char(1);
        assert_eq!(session.position().action_index, 1);

        session.seek_to_char(0);
        assert_eq!(session.position().action_index, 0);

        // Never fully typed: back to the start
        session.seek_to_char(3);
        assert_eq!(session.position().action_index, 0);
        assert_eq!(session.position().clean_index, 0);
    }

    #[test]
    fn test_seek_back_one_char() {
        let mut session = with_typos();
        session.seek_to_action(10);
        assert_eq!(session.position().clean_index, 6);

        session.seek_back_one_char();
        assert_eq!(session.position().action_index, 9);
        assert_eq!(session.position().clean_index, 5);

        // Passes over the whole typo run, which never changed the clean index
        session.seek_back_one_char();
        assert_eq!(session.position().action_index, 4);
        assert_eq!(session.position().clean_index, 4);
    }

    #[test]
    fn test_seek_back_skips_typos() {
        let mut session = session(
            "cat",
            vec![
                RecordedAction::new("c", 100.0),
                RecordedAction::new("cx", 100.0).with_typo("cat"),
                RecordedAction::new("ca", 100.0),
            ],
        );
        session.skip_to_end();

        session.seek_back_one_char();
        assert_eq!(session.position().action_index, 1);
        assert_eq!(session.position().clean_index, 1);
        assert!(session.raw_view().1.is_empty());
    }

    #[test]
    fn test_seek_forward_one_char() {
        let mut session = with_typos();
        session.seek_to_action(5);

        // Passes through the typo run until the clean index grows
        session.seek_forward_one_char();
        assert_eq!(session.position().action_index, 10);
        assert_eq!(session.position().clean_index, 6);

        session.skip_to_end();
        session.seek_forward_one_char();
        assert_eq!(session.position().action_index, 11);
    }

    #[test]
    fn test_char_steps_round_trip() {
        let mut session = with_typos();
        session.seek_to_action(3);
        let clean_index = session.position().clean_index;

        session.seek_back_one_char();
        assert!(session.position().clean_index < clean_index);

        session.seek_forward_one_char();
        assert_eq!(session.position().clean_index, clean_index);
    }

    #[test]
    fn test_seek_back_at_start() {
        let mut session = with_typos();
        session.seek_back_one_char();
        assert_eq!(session.position().action_index, 0);

        session.seek_to_action(1);
        session.seek_back_one_char();
        assert_eq!(session.position().action_index, 0);
    }

    #[test]
    fn test_action_steps() {
        let mut session = with_typos();

        session.step_action_back();
        assert_eq!(session.position().action_index, 0);

        session.step_action_forward();
        session.step_action_forward();
        assert_eq!(session.position().action_index, 2);

        session.skip_to_end();
        session.step_action_forward();
        assert_eq!(session.position().action_index, 11);

        session.skip_to_start();
        assert_eq!(session.position().action_index, 0);
        assert_eq!(session.position().clean_index, 0);
    }

    #[test]
    fn test_jump_to_peak() {
        let mut session = ReplaySession::new(ReplayData {
            quote: "abcd".to_string(),
            actions: vec![
                RecordedAction::new("a", 300.0),
                RecordedAction::new("ab", 100.0),
                RecordedAction::new("abc", 50.0),
                RecordedAction::new("abcd", 400.0),
            ],
            delays: vec![300.0, 100.0, 50.0, 400.0],
            raw_delays: vec![300.0; 4],
            graph: None,
        })
        .unwrap();

        assert_eq!(session.jump_to_peak_wpm(TimeBase::Unadjusted), 3);
        assert_eq!(session.position().clean_index, 3);
        assert_eq!(session.position().action_index, 3);
    }

    #[test]
    fn test_jump_to_peak_single_action() {
        let mut session = session("cat", vec![RecordedAction::new("cat", 300.0)]);

        // Every character of a flat curve ties, so the earliest one wins
        assert_eq!(session.jump_to_peak_wpm(TimeBase::Unadjusted), 1);
        assert_eq!(session.position().clean_index, 3);
        assert_eq!(session.position().action_index, 1);
    }

    #[test]
    fn test_coarse_jumps() {
        let quote = "a".repeat(100);
        let actions = (1..=100)
            .map(|len| RecordedAction::new(&"a".repeat(len), 10.0))
            .collect();
        let mut session = session(&quote, actions);

        session.jump_forward();
        assert_eq!(session.position().clean_index, 25);

        session.jump_forward();
        session.jump_forward();
        session.jump_forward();
        assert!(session.is_at_end());
        assert_eq!(session.position().clean_index, 100);

        session.jump_back();
        assert_eq!(session.position().clean_index, 75);

        session.seek_to_char(10);
        session.jump_back();
        assert_eq!(session.position().action_index, 0);
        assert_eq!(session.position().clean_index, 0);
    }

    #[test]
    fn test_seek_to_click() {
        let mut session = with_typos();

        session.seek_to_click(4, false);
        assert_eq!(session.position().clean_index, 4);

        session.seek_to_click(4, true);
        assert_eq!(session.position().clean_index, 5);
    }

    #[test]
    fn test_seek_to_segment() {
        let mut session = ReplaySession::new(ReplayData {
            quote: "ab cd".to_string(),
            actions: (1..=5)
                .map(|len| RecordedAction::new(&"ab cd"[..len], 100.0))
                .collect(),
            delays: vec![100.0; 5],
            raw_delays: vec![100.0; 5],
            graph: Some(GraphData {
                segments: vec![
                    Segment {
                        text: "ab ".to_string(),
                        wpm: 120.0,
                        raw_wpm: 120.0,
                    },
                    Segment {
                        text: "cd".to_string(),
                        wpm: 120.0,
                        raw_wpm: 120.0,
                    },
                ],
                ymax: None,
                yticks: None,
            }),
        })
        .unwrap();

        assert!(session.seek_to_segment(1));
        assert_eq!(session.position().clean_index, 3);

        assert!(!session.seek_to_segment(2));
        assert_eq!(session.position().clean_index, 3);

        let mut without = with_typos();
        assert!(!without.seek_to_segment(0));
    }

    #[test]
    fn test_seek_to_mistake() {
        let mut session = with_typos();
        assert_eq!(session.mistakes().len(), 1);

        assert!(session.seek_to_mistake(0));
        assert_eq!(session.position().action_index, 6);
        assert_eq!(session.raw_view().1, &['x']);

        assert!(!session.seek_to_mistake(1));
    }

    #[test]
    fn test_seek_while_playing() {
        let mut session = with_typos();
        session.start();
        session.tick(0.0);

        session.seek_to_action(4);
        assert!(session.position().is_playing);

        session.tick(100.0);
        assert_eq!(session.position().action_index, 5);
    }
}
