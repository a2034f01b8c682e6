use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use derive_more::From;
use rewind::Speed;
use thiserror::Error;

mod app;
mod config;
mod logging;
mod preferences;
mod replay_file;
mod utils;
mod view;

use app::App;
use config::{Config, ConfigError};
use preferences::{FileStore, PreferenceStore};
use replay_file::ReplayFileError;

/// Replay a recorded typing session in your terminal
#[derive(Debug, Parser)]
#[command(name = "retype", version, about)]
struct Args {
    /// The replay file (JSON) to play back
    replay: PathBuf,

    /// Directory containing `settings.toml`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial playback speed (0.25, 0.5, 1 or 2)
    #[arg(long)]
    speed: Option<Speed>,

    /// Show WPM with the first character's reaction time removed
    #[arg(long, conflicts_with = "unadjusted")]
    adjusted: bool,

    /// Show WPM over the full elapsed time
    #[arg(long)]
    unadjusted: bool,

    /// Compute per-word segments when the replay doesn't contain any
    #[arg(long)]
    segment_fallback: bool,
}

#[derive(Debug, From, Error)]
enum StartupError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Replay(ReplayFileError),

    #[error("Terminal error: {0}")]
    Terminal(std::io::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "Exiting");
            eprintln!("retype: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), StartupError> {
    let mut config = Config::get(args.config)?;

    if let Err(error) = logging::init(&config) {
        eprintln!("retype: logging disabled: {error}");
    }
    tracing::info!(config_dir = %config.config_dir.display(), "Loaded settings");

    let store = FileStore::in_dir(&config.data_dir);
    let stored = store.load().unwrap_or_else(|error| {
        tracing::warn!(%error, "Ignoring unreadable preferences");
        None
    });

    // Command line flags win over stored preferences, which win over settings
    let replay = &mut config.settings.replay;
    if let Some(preferences) = stored {
        replay.time_base = preferences.time_base();
    }
    if args.adjusted || args.unadjusted {
        replay.time_base = args.adjusted.into();
    }
    if let Some(speed) = args.speed {
        replay.speed = speed;
    }
    replay.segment_fallback |= args.segment_fallback;

    let session = replay_file::load(&args.replay, replay.clone())?;

    App::new(session, config, Box::new(store)).run()?;

    Ok(())
}
