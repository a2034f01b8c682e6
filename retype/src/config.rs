use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use rewind::Configuration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod theme;

/// Prefix of environment variables overriding settings, e.g. `RETYPE_REPLAY__SPEED=double`
const ENV_PREFIX: &str = "RETYPE_";

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: theme::Theme,
    pub replay: Configuration,
    /// Milliseconds between frames while playing
    pub frame_interval: u64,
    /// Where to write the log. Defaults to `retype.log` in the data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::Theme::default(),
            replay: Configuration::default(),
            frame_interval: 16,
            log_file: None,
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug, Default)]
pub struct Config {
    pub settings: Settings,
    pub config_dir: PathBuf,
    /// Where preferences and the log live
    pub data_dir: PathBuf,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let project_dirs = ProjectDirs::from("com", "ReType", "ReType");

        // An explicit config directory keeps everything in one place
        let (config_dir, data_dir) = match override_path {
            Some(path) => (path.clone(), path),
            None => project_dirs
                .map(|dirs| (dirs.config_dir().to_path_buf(), dirs.data_dir().to_path_buf()))
                .ok_or(ConfigError::NoDirectory)?,
        };

        Self::load(config_dir, data_dir)
    }

    fn load(config_dir: PathBuf, data_dir: PathBuf) -> Result<Self, ConfigError> {
        for dir in [&config_dir, &data_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        // Grab default configuration
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        let settings_toml = config_dir.join("settings.toml");
        if settings_toml.exists() {
            figment = figment.merge(Toml::file(settings_toml));
        }

        let settings: Settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        Ok(Self {
            settings,
            config_dir,
            data_dir,
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.settings
            .log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("retype.log"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rewind::{Speed, TimeBase};

    use super::*;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(config.settings.replay, Configuration::default());
        assert_eq!(config.settings.frame_interval, 16);
        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.log_file(), dir.path().join("retype.log"));
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.toml"),
            r#"
frame_interval = 33

[replay]
time_base = "adjusted"
speed = "half"
jump_min = 10

[theme.text]
typo = "Magenta"
"#,
        )
        .unwrap();

        let config = Config::get(Some(dir.path().to_path_buf())).unwrap();
        let replay = &config.settings.replay;

        assert_eq!(config.settings.frame_interval, 33);
        assert_eq!(replay.time_base, TimeBase::Adjusted);
        assert_eq!(replay.speed, Speed::Half);
        assert_eq!(replay.jump_min, 10);
        assert_eq!(replay.jump_max, 50);
        assert_eq!(
            config.settings.theme.text.typo,
            ratatui::style::Color::Magenta
        );
    }

    #[test]
    fn test_invalid_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.toml"), "frame_interval = \"soon\"").unwrap();

        let result = Config::get(Some(dir.path().to_path_buf()));
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("config");

        Config::get(Some(nested.clone())).unwrap();
        assert!(nested.is_dir());
    }
}
