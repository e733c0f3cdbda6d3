//! Log file setup.
//!
//! The terminal belongs to the UI, so events go to
//! `<data dir>/glyphfall.log`, truncated on every start.

use std::fs::{self, File};
use std::sync::Mutex;

use glyphfall_config::{LogSettings, project_dirs};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "glyphfall.log";

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
/// Does nothing when no data directory can be resolved.
pub fn init(settings: &LogSettings) -> color_eyre::Result<()> {
    let Some(dirs) = project_dirs() else {
        return Ok(());
    };
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)?;
    let file = File::create(dir.join(LOG_FILE))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
