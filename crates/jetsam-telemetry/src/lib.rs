//! Logging primitives for the jetsam binary.
//!
//! An unattended tool is diagnosed from its logs, so the subscriber is the
//! whole observability story: stdout for interactive runs plus an optional
//! append-mode log file wired from configuration.

pub mod init;

pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
