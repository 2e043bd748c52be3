//! Typed configuration models.
//!
//! # Design
//!
//! - Pure data carriers; IO lives in `loader.rs`, checks in `validate.rs`.
//! - The decision logic never reads these directly — the CLI resolves them
//!   into policy thresholds, daemon settings, and paths.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Root of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection and path settings for the transfer daemon.
    pub transfer_daemon: DaemonProfile,
    /// Log file destination; stdout-only logging when omitted.
    #[serde(default)]
    pub logging: Option<LoggingProfile>,
}

/// Connection and path settings for the transfer daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonProfile {
    /// Daemon host name or address.
    #[serde(default = "defaults::host")]
    pub host: String,
    /// Daemon RPC port.
    #[serde(default = "defaults::port")]
    pub port: u16,
    /// RPC username.
    pub username: String,
    /// RPC password.
    pub password: String,
    /// Directory holding completed downloads; the reconciler's base and the
    /// disk probe's mount reference.
    pub download_dir: PathBuf,
    /// Directory holding in-progress downloads. Parsed for forward
    /// compatibility; the reconciler never consults it.
    #[serde(default)]
    pub incomplete_dir: Option<PathBuf>,
}

/// Log file destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingProfile {
    /// Directory the log file is written into.
    pub file_path: PathBuf,
    /// Log file name within `file_path`.
    #[serde(default = "defaults::log_file_name")]
    pub file_name: String,
}

impl LoggingProfile {
    /// Full path of the log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.file_path.join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_fall_back_to_defaults() -> anyhow::Result<()> {
        let config: Config = serde_json::from_str(
            r#"{
                "transfer_daemon": {
                    "username": "admin",
                    "password": "hunter2",
                    "download_dir": "/srv/downloads"
                }
            }"#,
        )?;
        assert_eq!(config.transfer_daemon.host, defaults::DEFAULT_HOST);
        assert_eq!(config.transfer_daemon.port, defaults::DEFAULT_PORT);
        assert!(config.transfer_daemon.incomplete_dir.is_none());
        assert!(config.logging.is_none());
        Ok(())
    }

    #[test]
    fn logging_section_builds_the_full_log_path() -> anyhow::Result<()> {
        let profile: LoggingProfile = serde_json::from_str(
            r#"{ "file_path": "/var/log/jetsam" }"#,
        )?;
        assert_eq!(
            profile.log_file(),
            PathBuf::from("/var/log/jetsam/jetsam.log")
        );
        Ok(())
    }
}
