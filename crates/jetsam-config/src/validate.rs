//! Field-level validation applied after parsing.

use crate::error::{ConfigError, ConfigResult};
use crate::model::Config;

/// Check invariants the type system cannot express.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] naming the first offending field.
pub fn validate(config: &Config) -> ConfigResult<()> {
    let daemon = &config.transfer_daemon;

    if daemon.host.trim().is_empty() {
        return Err(ConfigError::invalid("transfer_daemon.host", "empty", None));
    }
    if daemon.port == 0 {
        return Err(ConfigError::invalid(
            "transfer_daemon.port",
            "zero",
            Some(daemon.port.to_string()),
        ));
    }
    if daemon.download_dir.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            "transfer_daemon.download_dir",
            "empty",
            None,
        ));
    }

    if let Some(logging) = &config.logging {
        if logging.file_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("logging.file_path", "empty", None));
        }
        if logging.file_name.trim().is_empty() {
            return Err(ConfigError::invalid("logging.file_name", "empty", None));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DaemonProfile, LoggingProfile};
    use std::path::PathBuf;

    fn base_config() -> Config {
        Config {
            transfer_daemon: DaemonProfile {
                host: "127.0.0.1".to_string(),
                port: 9091,
                username: "admin".to_string(),
                password: "hunter2".to_string(),
                download_dir: PathBuf::from("/srv/downloads"),
                incomplete_dir: None,
            },
            logging: None,
        }
    }

    #[test]
    fn well_formed_config_passes() -> anyhow::Result<()> {
        validate(&base_config())?;
        Ok(())
    }

    #[test]
    fn blank_host_is_rejected() {
        let mut config = base_config();
        config.transfer_daemon.host = "  ".to_string();
        let err = validate(&config).expect_err("blank host must fail");
        assert!(matches!(
            err,
            ConfigError::Invalid { field, .. } if field == "transfer_daemon.host"
        ));
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut config = base_config();
        config.transfer_daemon.port = 0;
        let err = validate(&config).expect_err("zero port must fail");
        assert!(matches!(
            err,
            ConfigError::Invalid { field, .. } if field == "transfer_daemon.port"
        ));
    }

    #[test]
    fn blank_log_file_name_is_rejected() {
        let mut config = base_config();
        config.logging = Some(LoggingProfile {
            file_path: PathBuf::from("/var/log/jetsam"),
            file_name: String::new(),
        });
        let err = validate(&config).expect_err("blank file name must fail");
        assert!(matches!(
            err,
            ConfigError::Invalid { field, .. } if field == "logging.file_name"
        ));
    }
}
