//! Log output to stdout and a per-launch file.
//!
//! Each launch gets its own timestamped file under the layout's `logs`
//! directory; only the newest few are kept. Log-file names embed the
//! launch time, so recency ordering is lexicographic.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app_dirs::{AppLayout, LayoutError};

/// How many log files survive a launch.
const KEPT_LOG_FILES: usize = 8;

const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The logs directory could not be resolved or created.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// This launch's log file could not be created.
    #[error("Could not create log file {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    /// The launch timestamp could not be rendered into a file name.
    #[error("Could not format log timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    /// Another subscriber is already installed.
    #[error("Could not install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Route tracing output to stdout and a fresh per-launch file.
///
/// Subsequent calls are no-ops. Failures are returned so callers can keep
/// starting up without file logging.
pub fn init() -> Result<(), LoggingError> {
    if GUARD.get().is_some() {
        return Ok(());
    }

    let dir = AppLayout::resolve()?.logs_dir()?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let path = dir.join(log_file_name(now)?);
    let file = fs::File::create(&path).map_err(|source| LoggingError::Create {
        path: path.clone(),
        source,
    })?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let timer = fmt::time::OffsetTime::new(
        UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        LINE_STAMP,
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_timer(timer.clone()).with_writer(io::stdout))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        )
        .try_init()?;
    let _ = GUARD.set(guard);

    prune_logs(&dir);
    tracing::info!("Logging initialized; log file at {}", path.display());
    Ok(())
}

fn log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!("clipdeck_{}.log", now.format(FILE_STAMP)?))
}

/// Best effort: a stale file that cannot be removed is only logged.
fn prune_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut logs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "log"))
        .collect();
    if logs.len() <= KEPT_LOG_FILES {
        return;
    }
    logs.sort();
    for stale in &logs[..logs.len() - KEPT_LOG_FILES] {
        if let Err(err) = fs::remove_file(stale) {
            tracing::warn!(path = %stale.display(), error = %err, "could not remove old log file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_file_name_embeds_the_launch_time() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(
            log_file_name(fixed).unwrap(),
            "clipdeck_2023-11-14_22-13-20.log"
        );
    }

    #[test]
    fn prune_drops_the_lexicographically_oldest_files() {
        let dir = tempdir().unwrap();
        for hour in 0..10 {
            let name = format!("clipdeck_2024-05-02_{hour:02}-00-00.log");
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        prune_logs(dir.path());

        let mut remaining: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name.ends_with(".log"))
            .collect();
        remaining.sort();
        assert_eq!(remaining.len(), KEPT_LOG_FILES);
        assert_eq!(remaining[0], "clipdeck_2024-05-02_02-00-00.log");
        assert!(dir.path().join("notes.txt").exists());
    }
}
