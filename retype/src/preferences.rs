use std::path::{Path, PathBuf};

use derive_more::From;
use rewind::TimeBase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFERENCES_FILE: &str = "preferences.toml";

/// Choices the viewer remembers between runs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub adjusted_wpm: bool,
}

impl Preferences {
    pub const fn time_base(self) -> TimeBase {
        if self.adjusted_wpm {
            TimeBase::Adjusted
        } else {
            TimeBase::Unadjusted
        }
    }
}

impl From<TimeBase> for Preferences {
    fn from(base: TimeBase) -> Self {
        Self {
            adjusted_wpm: base.is_adjusted(),
        }
    }
}

#[derive(Debug, From, Error)]
pub enum PreferenceError {
    #[error("Failed to access preferences: {0}")]
    Io(std::io::Error),

    #[error("Failed to parse preferences: {0}")]
    Parse(toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(toml::ser::Error),
}

/// Somewhere preferences can be read from and written to
pub trait PreferenceStore {
    /// Returns `None` if nothing has been stored yet
    fn load(&self) -> Result<Option<Preferences>, PreferenceError>;

    fn save(&self, preferences: Preferences) -> Result<(), PreferenceError>;
}

/// Stores preferences as a TOML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(PREFERENCES_FILE),
        }
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Result<Option<Preferences>, PreferenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    fn save(&self, preferences: Preferences) -> Result<(), PreferenceError> {
        let content = toml::to_string(&preferences)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
