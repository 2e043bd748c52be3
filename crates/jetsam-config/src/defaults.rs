//! Fallback values applied while deserialising the configuration file.

/// Daemon host assumed when the file omits one.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Standard Transmission RPC port.
pub const DEFAULT_PORT: u16 = 9091;

/// Log file name used when the logging section omits one.
pub const DEFAULT_LOG_FILE_NAME: &str = "jetsam.log";

pub(crate) fn host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) const fn port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn log_file_name() -> String {
    DEFAULT_LOG_FILE_NAME.to_string()
}
