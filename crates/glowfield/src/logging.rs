//! File-based tracing setup.
//!
//! The canvas owns the whole terminal, so logs go to
//! `<data dir>/glowfield/glowfield.log` and only when `GLOWFIELD_LOG` is set.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `debug`.
const LOG_ENV: &str = "GLOWFIELD_LOG";
const LOG_FILE: &str = "glowfield.log";

/// Install the global subscriber if logging was requested.
///
/// Returns the log file path when logging is active.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(None);
    };

    let dir = ProjectDirs::from("", "", "glowfield")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    Ok(Some(path))
}
