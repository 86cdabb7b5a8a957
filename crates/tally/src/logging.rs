//! File logging.
//!
//! The terminal belongs to the dashboard, so log output goes to a file in the
//! platform's local data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter, e.g. `TALLY_LOG=debug`.
pub const LOG_ENV: &str = "TALLY_LOG";

const LOG_FILE: &str = "tally.log";
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Returns the log file path, or `None` if
/// logging could not be set up (the dashboard runs without it).
pub fn init() -> Option<PathBuf> {
    let dir = ProjectDirs::from("", "", "tally")?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter_layer =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .ok()?;

    Some(path)
}
