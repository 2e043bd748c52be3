//! Cleanup driver: probe, plan, optionally execute, re-probe, report.

use jetsam_config::Config;
use jetsam_core::{
    PolicyConfig, RemovalExecutor as _, TransferSource as _, human_size, plan, plan_by_ratio,
};
use jetsam_fsops::probe;
use tracing::{debug, info};

use crate::cli::{CleanupArgs, CleanupMode, CliError, CliResult, build_client};

pub(crate) async fn handle(config: &Config, args: CleanupArgs) -> CliResult<()> {
    let policy = resolve_policy(&args)?;
    let mount = args
        .path
        .clone()
        .unwrap_or_else(|| config.transfer_daemon.download_dir.clone());

    if !policy.execute {
        info!("preview mode: no removal request will be sent to the daemon");
    }

    let initial = probe::snapshot(&mount).map_err(|err| CliError::Failure(err.into()))?;
    info!(
        free = %human_size(initial.free_bytes),
        target = %human_size(policy.min_free_space_bytes),
        mount = %mount.display(),
        "probed disk space"
    );

    if initial.free_bytes >= policy.min_free_space_bytes {
        info!("free space already above the target; no cleanup needed");
        return Ok(());
    }
    info!(
        deficit = %human_size(initial.deficit_against(policy.min_free_space_bytes)),
        "free space below target"
    );

    // The transfer fetch is the expensive step; it only happens once the
    // probe has established a deficit.
    let client = build_client(config)?;
    let transfers = client.list().await?;
    info!(transfers = transfers.len(), "fetched transfer list");

    // Fresh sample for the plan itself: the disk keeps moving under other
    // writers, and the plan should price the deficit as it stands now.
    let before = probe::snapshot(&mount).map_err(|err| CliError::Failure(err.into()))?;
    let removal_plan = match args.mode {
        CleanupMode::FreeSpace => plan(&before, &transfers, &policy),
        CleanupMode::SeedRatio => plan_by_ratio(&before, &transfers, &policy),
    };

    if removal_plan.is_empty() {
        if removal_plan.space_target_met {
            info!("free space recovered while fetching the transfer list; no cleanup needed");
        } else {
            info!(
                min_ratio = policy.min_seed_ratio,
                "no transfer clears the ratio floor; nothing safely removable"
            );
        }
        return Ok(());
    }

    for entry in &removal_plan.selected {
        debug!(
            id = %entry.transfer.id,
            name = %entry.transfer.name,
            ratio = entry.transfer.ratio,
            size = %human_size(entry.transfer.total_size_bytes),
            cumulative = %human_size(entry.cumulative_bytes),
            "selected for removal"
        );
    }
    info!(
        selected = removal_plan.len(),
        reclaim = %human_size(removal_plan.total_bytes_selected),
        projected_free = %human_size(removal_plan.projected_free_bytes(&before)),
        target_met = removal_plan.space_target_met,
        "computed removal plan"
    );
    if !removal_plan.space_target_met {
        info!(
            "plan covers only part of the deficit; consider lowering the ratio floor or the \
             free-space target"
        );
    }

    if !policy.execute {
        return Ok(());
    }

    client.remove(&removal_plan.ids(), true).await?;
    info!(removed = removal_plan.len(), "removal requested");

    // Independent snapshot: the disk may have drifted while we worked, so
    // report what is actually there now instead of assuming success.
    let after = probe::snapshot(&mount).map_err(|err| CliError::Failure(err.into()))?;
    if after.free_bytes >= policy.min_free_space_bytes {
        info!(
            free = %human_size(after.free_bytes),
            "free-space target reached"
        );
    } else {
        info!(
            free = %human_size(after.free_bytes),
            target = %human_size(policy.min_free_space_bytes),
            "free space still below target after cleanup"
        );
    }
    Ok(())
}

fn resolve_policy(args: &CleanupArgs) -> CliResult<PolicyConfig> {
    let defaults = PolicyConfig::default();
    let min_seed_ratio = args.min_ratio.unwrap_or(defaults.min_seed_ratio);
    if min_seed_ratio < 0.0 || !min_seed_ratio.is_finite() {
        return Err(CliError::validation(
            "--min-ratio must be a non-negative, finite number",
        ));
    }
    Ok(PolicyConfig {
        min_free_space_bytes: args
            .min_free_space
            .unwrap_or(defaults.min_free_space_bytes),
        min_seed_ratio,
        execute: args.execute,
    })
}
