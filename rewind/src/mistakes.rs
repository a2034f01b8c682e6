use crate::Action;

/// The first action of a run of typos, deduplicated by the word being attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake {
    pub word: String,
    /// Index of the action where the typo run started
    pub action_index: usize,
}

impl Mistake {
    /// Position to seek to for showing the mistake: right after the offending action
    pub const fn seek_target(&self) -> usize {
        self.action_index + 1
    }
}

/// Collect the distinct mistakes of a log, in the order they were first made
pub fn mistakes(actions: &[Action]) -> Vec<Mistake> {
    let mut found: Vec<Mistake> = Vec::new();
    let mut in_typo = false;

    for (index, action) in actions.iter().enumerate() {
        if !action.typo {
            in_typo = false;
            continue;
        }

        if in_typo {
            continue;
        }

        in_typo = true;
        if !found.iter().any(|mistake| mistake.word == action.target_word) {
            found.push(Mistake {
                word: action.target_word.clone(),
                action_index: index,
            });
        }
    }

    found
}
