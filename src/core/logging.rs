//! Logging setup.
//!
//! The chat panel owns the terminal while it runs, so everything goes to a
//! daily-rolling JSON file instead of stdout. `log` macros are bridged into
//! `tracing` so both styles end up in the same file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix of the rolling log.
pub const LOG_FILE_PREFIX: &str = "character-chat.log";

/// Directory the log files are written to.
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Initialize file-only logging for TUI mode.
///
/// `default_level` applies when `RUST_LOG` is unset. `keep_files` bounds how
/// many rolled files survive; older ones are removed in the background.
///
/// Returns a `WorkerGuard` that must stay alive until shutdown so buffered
/// lines are flushed.
pub fn init_tui(data_dir: &Path, default_level: &str, keep_files: usize) -> WorkerGuard {
    let log_dir = log_dir(data_dir);

    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer: the TUI owns the terminal
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }

    // try_init installs the bridge itself when tracing-log is enabled
    if let Err(e) = tracing_log::LogTracer::init() {
        log::debug!("log bridge already installed: {e}");
    }

    let prune_dir = log_dir.clone();
    std::thread::spawn(move || {
        prune_old_logs(&prune_dir, keep_files);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Remove rolled log files beyond the newest `keep`.
///
/// Rolled files are named `<prefix>.YYYY-MM-DD`, so lexical order is
/// chronological order.
pub fn prune_old_logs(log_dir: &Path, keep: usize) -> usize {
    let Ok(entries) = fs::read_dir(log_dir) else {
        return 0;
    };

    let rolled_prefix = format!("{LOG_FILE_PREFIX}.");
    let mut rolled: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&rolled_prefix))
        })
        .collect();

    if rolled.len() <= keep {
        return 0;
    }

    rolled.sort();
    let excess = rolled.len() - keep;
    let mut removed = 0;
    for path in rolled.into_iter().take(excess) {
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Removed old log: {:?}", path);
                removed += 1;
            }
            Err(e) => log::warn!("Failed to remove old log {:?}: {}", path, e),
        }
    }
    removed
}
