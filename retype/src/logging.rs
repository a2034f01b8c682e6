use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Send logs to the configured log file. The terminal belongs to the UI.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init(config: &Config) -> std::io::Result<()> {
    let path = config.log_file();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    if result.is_ok() {
        tracing::info!(path = %path.display(), "Logging started");
    }

    Ok(())
}
