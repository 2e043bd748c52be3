//! Telemetry initialisation primitives and logging configuration.
//!
//! # Design
//! - Centralises logging setup (fmt or JSON) with a single entry point.
//! - An unwritable log file degrades to stdout-only with a warning rather
//!   than failing the run; the tool is expected to keep working unattended.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default logging target when `RUST_LOG` is not provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Log level string (e.g., `info`, `debug`).
    pub level: &'a str,
    /// Output format selection for the tracing subscriber.
    pub format: LogFormat,
    /// Optional log file appended to alongside stdout.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            log_file: None,
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// Emit logs as structured JSON objects.
    Json,
    /// Emit human-readable, pretty-printed logs.
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for
/// example, because another subscriber has already been set globally). An
/// unopenable log file is not an error; it is reported on stderr and the
/// subscriber proceeds without the file layer.
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level));

    let file_layer = config
        .log_file
        .as_deref()
        .and_then(open_log_file)
        .map(|file| fmt::layer().with_ansi(false).with_writer(Arc::new(file)));

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
    }
    .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

fn open_log_file(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!(
                "log file '{}' is not writable ({err}); continuing with stdout only",
                path.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn unwritable_log_path_falls_back_to_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"plain file").expect("write blocker");
        // A path below a plain file cannot be opened.
        assert!(open_log_file(&blocker.join("jetsam.log")).is_none());
    }

    #[test]
    fn writable_log_path_opens_in_append_mode() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("jetsam.log");
        let mut file = open_log_file(&path).expect("open log file");
        file.write_all(b"line\n").expect("append");
        assert!(path.exists());
    }

    #[test]
    fn install_succeeds_once_per_process() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = LoggingConfig {
            level: "debug",
            format: LogFormat::Pretty,
            log_file: Some(dir.path().join("jetsam.log")),
        };
        init_logging(&config).expect("first install succeeds");
        // The global default is already set now; a second install must
        // surface the conflict instead of silently replacing it.
        assert!(init_logging(&config).is_err());
    }
}
