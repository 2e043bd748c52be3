//! Value objects exchanged between the daemon adapter and the policy engine.
//!
//! # Design
//!
//! - Immutable snapshots: every type here is constructed fresh per run and
//!   never mutated by the decision logic.
//! - No I/O and no clock reads; timestamps arrive from collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-space floor applied when the caller does not raise it: 100 GiB.
pub const DEFAULT_MIN_FREE_SPACE_BYTES: u64 = 100 * 1024 * 1024 * 1024;

/// Daemon-assigned identifier for a managed transfer.
///
/// Only ever echoed back in removal requests; jetsam assigns no identifiers
/// of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(pub i64);

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle label reported by the daemon. Display only; the policy engine
/// never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    /// Transfer is stopped.
    Stopped,
    /// Queued for a local data check.
    CheckQueued,
    /// Local data check in progress.
    Checking,
    /// Queued for download.
    DownloadQueued,
    /// Actively downloading.
    Downloading,
    /// Queued for seeding.
    SeedQueued,
    /// Actively seeding.
    Seeding,
    /// Status code not recognised by this client.
    Unknown,
}

impl TransferStatus {
    /// Decode the daemon's numeric status code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Stopped,
            1 => Self::CheckQueued,
            2 => Self::Checking,
            3 => Self::DownloadQueued,
            4 => Self::Downloading,
            5 => Self::SeedQueued,
            6 => Self::Seeding,
            _ => Self::Unknown,
        }
    }

    /// Render the status as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::CheckQueued => "check_queued",
            Self::Checking => "checking",
            Self::DownloadQueued => "download_queued",
            Self::Downloading => "downloading",
            Self::SeedQueued => "seed_queued",
            Self::Seeding => "seeding",
            Self::Unknown => "unknown",
        }
    }
}

/// Immutable snapshot of one managed transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    /// Identifier used for removal requests.
    pub id: TransferId,
    /// Display name, expected to match an on-disk entry name 1:1.
    pub name: String,
    /// Total payload size in bytes.
    pub total_size_bytes: u64,
    /// Uploaded-to-downloaded ratio; zero or fractional is valid.
    pub ratio: f64,
    /// Timestamp the daemon admitted the transfer.
    pub added_at: DateTime<Utc>,
    /// Completion fraction in `[0, 1]`; display only.
    pub progress: f64,
    /// Lifecycle label; display only.
    pub status: TransferStatus,
}

/// Point-in-time free/total/used byte counts for one mount.
///
/// `free_bytes + used_bytes == total_bytes` is assumed, never verified;
/// the policy engine treats the snapshot as read-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiskSnapshot {
    /// Bytes available to unprivileged writers.
    pub free_bytes: u64,
    /// Total capacity of the mount.
    pub total_bytes: u64,
    /// Bytes currently in use.
    pub used_bytes: u64,
}

impl DiskSnapshot {
    /// Bytes still needed to reach `min_free_space_bytes`; zero when the
    /// target is already satisfied.
    #[must_use]
    pub const fn deficit_against(&self, min_free_space_bytes: u64) -> u64 {
        min_free_space_bytes.saturating_sub(self.free_bytes)
    }
}

/// Fully-resolved retention thresholds handed to the policy engine.
///
/// Defaults are applied once at construction; nothing is read from shared
/// globals at evaluation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Free-space target in bytes.
    pub min_free_space_bytes: u64,
    /// Seed-ratio floor for eligibility; zero disables no one — a transfer
    /// still needs `ratio > 0` to qualify for the free-space walk.
    pub min_seed_ratio: f64,
    /// Whether the caller intends to act on the plan. The engine itself
    /// never mutates anything either way.
    pub execute: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_free_space_bytes: DEFAULT_MIN_FREE_SPACE_BYTES,
            min_seed_ratio: 0.0,
            execute: false,
        }
    }
}

/// One transfer admitted to a removal plan, with the running total after
/// its inclusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedTransfer {
    /// The transfer slated for removal.
    pub transfer: Transfer,
    /// Bytes selected so far, this transfer included.
    pub cumulative_bytes: u64,
}

/// Ordered outcome of a policy evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemovalPlan {
    /// Transfers to remove, in selection order.
    pub selected: Vec<SelectedTransfer>,
    /// Sum of the selected transfer sizes.
    pub total_bytes_selected: u64,
    /// Whether executing the plan is believed to reach the free-space
    /// target.
    pub space_target_met: bool,
}

impl RemovalPlan {
    /// An empty plan carrying only the target verdict.
    #[must_use]
    pub const fn empty(space_target_met: bool) -> Self {
        Self {
            selected: Vec::new(),
            total_bytes_selected: 0,
            space_target_met,
        }
    }

    /// Whether the plan selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of transfers selected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Identifiers of the selected transfers, in selection order.
    #[must_use]
    pub fn ids(&self) -> Vec<TransferId> {
        self.selected
            .iter()
            .map(|entry| entry.transfer.id)
            .collect()
    }

    /// Free space expected after execution: snapshot plus selected bytes.
    /// Pure arithmetic; the disk is never re-probed here.
    #[must_use]
    pub const fn projected_free_bytes(&self, snapshot: &DiskSnapshot) -> u64 {
        snapshot.free_bytes.saturating_add(self.total_bytes_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip_known_labels() {
        assert_eq!(TransferStatus::from_code(0), TransferStatus::Stopped);
        assert_eq!(TransferStatus::from_code(6), TransferStatus::Seeding);
        assert_eq!(TransferStatus::from_code(42), TransferStatus::Unknown);
        assert_eq!(TransferStatus::Seeding.as_str(), "seeding");
    }

    #[test]
    fn deficit_saturates_when_target_already_met() {
        let snapshot = DiskSnapshot {
            free_bytes: 200,
            total_bytes: 300,
            used_bytes: 100,
        };
        assert_eq!(snapshot.deficit_against(150), 0);
        assert_eq!(snapshot.deficit_against(250), 50);
    }

    #[test]
    fn policy_defaults_match_the_documented_floor() {
        let config = PolicyConfig::default();
        assert_eq!(config.min_free_space_bytes, DEFAULT_MIN_FREE_SPACE_BYTES);
        assert!(config.min_seed_ratio.abs() < f64::EPSILON);
        assert!(!config.execute);
    }

    #[test]
    fn projected_free_space_is_arithmetic_only() {
        let snapshot = DiskSnapshot {
            free_bytes: 10,
            total_bytes: 100,
            used_bytes: 90,
        };
        let plan = RemovalPlan {
            selected: Vec::new(),
            total_bytes_selected: 25,
            space_target_met: false,
        };
        assert_eq!(plan.projected_free_bytes(&snapshot), 35);
    }
}
