use std::path::{Path, PathBuf};

use derive_more::From;
use rewind::{Configuration, MalformedLog, ReplayData, ReplaySession};
use thiserror::Error;

#[derive(Debug, From, Error)]
pub enum ReplayFileError {
    #[error("Failed to read replay '{path}': {error}")]
    #[from(skip)]
    Read { path: PathBuf, error: std::io::Error },

    #[error("Failed to parse replay: {0}")]
    Parse(serde_json::Error),

    #[error("Malformed replay: {0}")]
    Malformed(MalformedLog),
}

/// Read a replay file and load it into a session
pub fn load(path: &Path, config: Configuration) -> Result<ReplaySession, ReplayFileError> {
    let content = std::fs::read_to_string(path).map_err(|error| ReplayFileError::Read {
        path: path.to_path_buf(),
        error,
    })?;

    let data: ReplayData = serde_json::from_str(&content)?;
    tracing::info!(path = %path.display(), "Read replay file");

    Ok(ReplaySession::with_configuration(data, config)?)
}
