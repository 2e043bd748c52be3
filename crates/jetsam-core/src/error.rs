//! # Design
//!
//! - Constant-message errors with structured context, so adapters stay
//!   greppable and log fields carry the variable parts.
//! - Connection-class failures are fatal to a run; the driver maps them to
//!   their own exit code.

use std::error::Error;

use thiserror::Error;

/// Convenience alias for daemon collaborator results.
pub type DaemonResult<T> = Result<T, DaemonError>;

/// Errors surfaced by transfer-daemon collaborators.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// The configured daemon endpoint is not a usable URL.
    #[error("transfer daemon endpoint invalid")]
    Endpoint {
        /// Offending endpoint value.
        value: String,
    },
    /// The daemon could not be reached at all.
    #[error("transfer daemon unreachable")]
    Connection {
        /// Operation that was attempted.
        operation: &'static str,
        /// Underlying transport failure.
        source: Box<dyn Error + Send + Sync>,
    },
    /// The daemon rejected the supplied credentials.
    #[error("transfer daemon rejected credentials")]
    Unauthorized {
        /// Operation that was attempted.
        operation: &'static str,
    },
    /// The daemon answered but refused the request.
    #[error("transfer daemon rejected request")]
    Rejected {
        /// Operation that was attempted.
        operation: &'static str,
        /// Daemon-reported reason string.
        reason: String,
    },
    /// The daemon's response could not be decoded.
    #[error("transfer daemon returned malformed response")]
    Malformed {
        /// Operation that was attempted.
        operation: &'static str,
        /// Underlying decode failure.
        source: Box<dyn Error + Send + Sync>,
    },
}

impl DaemonError {
    /// Wrap a transport failure.
    pub fn connection(
        operation: &'static str,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            operation,
            source: Box::new(source),
        }
    }

    /// Wrap a decode failure.
    pub fn malformed(operation: &'static str, source: impl Error + Send + Sync + 'static) -> Self {
        Self::Malformed {
            operation,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn helpers_build_variants_with_sources() {
        let err = DaemonError::connection("torrent-get", io::Error::other("refused"));
        assert!(matches!(err, DaemonError::Connection { .. }));
        assert!(err.source().is_some());

        let err = DaemonError::malformed("torrent-get", io::Error::other("truncated"));
        assert!(matches!(err, DaemonError::Malformed { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn rejection_carries_the_daemon_reason() {
        let err = DaemonError::Rejected {
            operation: "torrent-remove",
            reason: "no such torrent".to_string(),
        };
        assert!(matches!(
            err,
            DaemonError::Rejected { reason, .. } if reason.contains("no such")
        ));
    }
}
