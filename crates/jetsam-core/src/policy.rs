//! Retention policy evaluation.
//!
//! # Design
//!
//! - Pure functions over value objects: no I/O, no clock, no state carried
//!   between evaluations, so repeated calls need no reset.
//! - Greedy by seed ratio rather than bin-packing: ratio, not size, is the
//!   dominant policy signal, and a minimal-count optimum is not worth the
//!   complexity for an advisory tool.

use crate::model::{DiskSnapshot, PolicyConfig, RemovalPlan, SelectedTransfer, Transfer};

/// Compute the removal set needed to lift free space back to the target.
///
/// Transfers are walked once, sorted by seed ratio descending (equal ratios
/// keep their input order), accumulating any transfer whose ratio strictly
/// exceeds `min_seed_ratio` until the deficit is covered. A skipped transfer
/// is never reconsidered. Exhausting the list below the deficit is not an
/// error: the partial plan is returned with `space_target_met` unset and the
/// caller decides whether partial reclamation is worth executing.
#[must_use]
pub fn plan(snapshot: &DiskSnapshot, transfers: &[Transfer], config: &PolicyConfig) -> RemovalPlan {
    if snapshot.free_bytes >= config.min_free_space_bytes {
        return RemovalPlan::empty(true);
    }
    let deficit = snapshot.deficit_against(config.min_free_space_bytes);

    let mut candidates: Vec<&Transfer> = transfers.iter().collect();
    candidates.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));

    let mut selected = Vec::new();
    let mut cumulative: u64 = 0;
    for transfer in candidates {
        if cumulative >= deficit {
            break;
        }
        if transfer.ratio > config.min_seed_ratio {
            cumulative = cumulative.saturating_add(transfer.total_size_bytes);
            selected.push(SelectedTransfer {
                transfer: transfer.clone(),
                cumulative_bytes: cumulative,
            });
        }
    }

    RemovalPlan {
        total_bytes_selected: cumulative,
        space_target_met: cumulative >= deficit,
        selected,
    }
}

/// Compute the removal set for ratio-only cleanup: every transfer whose
/// ratio is at or above the floor, regardless of how much space that frees.
///
/// The comparison here is inclusive (`>=`) where [`plan`] is strict (`>`);
/// the two modes inherit different comparisons and keep them. The target
/// verdict is still reported so callers can tell whether the sweep happens
/// to satisfy the free-space floor as well.
#[must_use]
pub fn plan_by_ratio(
    snapshot: &DiskSnapshot,
    transfers: &[Transfer],
    config: &PolicyConfig,
) -> RemovalPlan {
    let mut candidates: Vec<&Transfer> = transfers.iter().collect();
    candidates.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));

    let mut selected = Vec::new();
    let mut cumulative: u64 = 0;
    for transfer in candidates {
        if transfer.ratio >= config.min_seed_ratio {
            cumulative = cumulative.saturating_add(transfer.total_size_bytes);
            selected.push(SelectedTransfer {
                transfer: transfer.clone(),
                cumulative_bytes: cumulative,
            });
        }
    }

    RemovalPlan {
        total_bytes_selected: cumulative,
        space_target_met: snapshot.free_bytes.saturating_add(cumulative)
            >= config.min_free_space_bytes,
        selected,
    }
}
