use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dash_data::loader::find_csv_files;

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.beecycle-dash/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.beecycle-dash/`
/// - `~/.beecycle-dash/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let dash_dir = home.join(".beecycle-dash");
    std::fs::create_dir_all(&dash_dir)?;
    std::fs::create_dir_all(dash_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired, all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => return Err(anyhow::anyhow!("unknown log level: {other}")),
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-file discovery ────────────────────────────────────────────────────────

/// Attempt to locate the sales dataset on the local system.
///
/// Checks the following directories in order and returns the first CSV file
/// found (files are sorted, so the result is deterministic):
/// 1. `./data/`
/// 2. `~/.beecycle-dash/data/`
///
/// Returns `None` when neither directory yields a CSV file.
pub fn discover_data_file() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("data")];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".beecycle-dash").join("data"));
    }
    discover_data_file_in(&candidates)
}

/// Search `candidates` in order and return the first CSV file found
/// (the seam used for testing without touching `HOME`).
pub fn discover_data_file_in(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().flat_map(|dir| find_csv_files(dir)).next()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
