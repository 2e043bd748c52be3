//! Configuration file IO and parsing.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::model::Config;
use crate::validate::validate;

/// Load, parse, and validate the configuration file at `path`.
///
/// # Errors
///
/// Returns an IO error when the file cannot be read, a parse error when it
/// is not the expected JSON shape, and a validation error when a field
/// value is unusable. All three are fatal configuration failures.
pub fn load(path: &Path) -> ConfigResult<Config> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
    let config: Config =
        serde_json::from_str(&raw).map_err(|source| ConfigError::parse(path, source))?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_a_complete_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(
            br#"{
                "transfer_daemon": {
                    "host": "tracker.lan",
                    "port": 9092,
                    "username": "admin",
                    "password": "hunter2",
                    "download_dir": "/srv/downloads",
                    "incomplete_dir": "/srv/incomplete"
                },
                "logging": { "file_path": "/var/log/jetsam", "file_name": "run.log" }
            }"#,
        )?;

        let config = load(file.path())?;
        assert_eq!(config.transfer_daemon.host, "tracker.lan");
        assert_eq!(config.transfer_daemon.port, 9092);
        assert_eq!(
            config.transfer_daemon.incomplete_dir.as_deref(),
            Some(Path::new("/srv/incomplete"))
        );
        let logging = config.logging.expect("logging section present");
        assert_eq!(logging.file_name, "run.log");
        Ok(())
    }

    #[test]
    fn missing_file_reports_io() {
        let err = load(Path::new("/no/such/config.json")).expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_json_reports_parse() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"{ not json")?;
        let err = load(file.path()).expect_err("malformed file must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        Ok(())
    }
}
