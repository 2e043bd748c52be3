//! Reconciliation driver: diff tracked names against the download directory.

use jetsam_config::Config;
use jetsam_core::{TransferSource as _, human_size};
use jetsam_fsops::reconcile;
use tracing::info;

use crate::cli::{CliError, CliResult, ReconcileArgs, build_client};
use crate::output;

pub(crate) async fn handle(config: &Config, args: ReconcileArgs) -> CliResult<()> {
    let base_dir = args
        .dir
        .clone()
        .unwrap_or_else(|| config.transfer_daemon.download_dir.clone());

    // Precondition for the whole reconciliation: without a readable listing
    // no transfer-to-disk comparison is meaningful.
    reconcile::ensure_reconcilable(&base_dir).map_err(|err| CliError::Failure(err.into()))?;
    let entries =
        reconcile::list_entries(&base_dir).map_err(|err| CliError::Failure(err.into()))?;

    let client = build_client(config)?;
    let transfers = client.list().await?;

    let orphans = reconcile::diff(&transfers, &entries);
    info!(
        orphans = orphans.len(),
        directory_entries = orphans.directory_entries,
        tracked_transfers = orphans.tracked_transfers,
        dir = %base_dir.display(),
        "computed reconciliation diff"
    );

    if orphans.is_empty() {
        info!("no orphaned entries; the directory matches the transfer list");
        return Ok(());
    }

    let sized: Vec<(String, u64)> = orphans
        .orphans
        .iter()
        .map(|name| (name.clone(), reconcile::entry_size(&base_dir.join(name))))
        .collect();
    let total: u64 = sized.iter().map(|(_, bytes)| *bytes).sum();
    output::render_orphans(&sized);
    info!(
        orphans = orphans.len(),
        total = %human_size(total),
        "orphaned data on disk"
    );

    if !args.execute {
        info!("preview mode: pass --execute to delete the entries above");
        return Ok(());
    }

    let result = reconcile::reconcile(&orphans, &base_dir, true);
    info!(
        removed = result.removed.len(),
        failed = result.failed.len(),
        reclaimed = %human_size(result.bytes_reclaimed),
        "reconciliation finished"
    );
    Ok(())
}
