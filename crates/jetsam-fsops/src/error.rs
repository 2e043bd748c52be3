//! # Design
//!
//! - Constant-message errors carrying operation and path context, so a
//!   failed run can be reproduced from its log line alone.
//! - Precondition violations are distinct from per-entry IO failures: the
//!   former abort a reconciliation, the latter never do.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors produced by disk probing and reconciliation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO failures while interacting with the filesystem.
    #[error("storage io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A reconciliation precondition does not hold for the base directory.
    #[error("storage precondition violated")]
    Precondition {
        /// Directory that failed the check.
        path: PathBuf,
        /// Static reason for the failure.
        reason: &'static str,
    },
    /// Syscall failures reported by the platform layer.
    #[error("storage syscall failure")]
    Sys {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying errno.
        source: nix::Error,
    },
    /// Operation is not available on this platform.
    #[error("storage operation unsupported")]
    Unsupported {
        /// Operation that is unsupported.
        operation: &'static str,
    },
}

impl StorageError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn precondition(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        Self::Precondition {
            path: path.into(),
            reason,
        }
    }

    #[cfg(unix)]
    pub(crate) fn sys(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: nix::Error,
    ) -> Self {
        Self::Sys {
            operation,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn helpers_build_variants() {
        let err = StorageError::io("read_dir", "/downloads", io::Error::other("io"));
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(err.source().is_some());

        let err = StorageError::precondition("/missing", "not_a_directory");
        assert!(matches!(
            err,
            StorageError::Precondition { reason, .. } if reason == "not_a_directory"
        ));
    }
}
