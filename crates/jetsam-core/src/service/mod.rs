//! Collaborator traits implemented by daemon adapters.

use async_trait::async_trait;

use crate::error::DaemonResult;
use crate::model::{Transfer, TransferId};

/// Read side of the daemon: a point-in-time snapshot of managed transfers.
///
/// Fetching the list is the expensive step of a run; drivers short-circuit
/// it whenever the disk already satisfies the free-space target.
#[async_trait]
pub trait TransferSource: Send + Sync {
    /// Retrieve the current transfer list.
    ///
    /// # Errors
    ///
    /// Returns a connection-class error when the daemon is unreachable or
    /// rejects credentials; both are fatal to the whole run.
    async fn list(&self) -> DaemonResult<Vec<Transfer>>;
}

/// Write side of the daemon: removal of transfers, optionally with their
/// on-disk data.
#[async_trait]
pub trait RemovalExecutor: Send + Sync {
    /// Request removal of the given transfers. Fire-and-forget: no retry is
    /// attempted here, a failure is surfaced to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error when the daemon is unreachable or refuses the
    /// request.
    async fn remove(&self, ids: &[TransferId], delete_data: bool) -> DaemonResult<()>;
}
