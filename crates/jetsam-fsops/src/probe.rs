//! Point-in-time disk-space measurement for the configured download mount.

use std::path::Path;

use jetsam_core::DiskSnapshot;

use crate::error::StorageResult;

/// Capture free/total/used byte counts for the filesystem holding `path`.
///
/// Each call is an independent snapshot; callers that need before/after
/// numbers probe twice rather than deriving one from the other.
///
/// # Errors
///
/// Returns an error when the path does not exist or the filesystem refuses
/// the query; both are configuration-class failures, fatal to the run.
#[cfg(unix)]
pub fn snapshot(path: &Path) -> StorageResult<DiskSnapshot> {
    use crate::error::StorageError;
    use nix::sys::statvfs::statvfs;

    let stat = statvfs(path).map_err(|source| StorageError::sys("statvfs", path, source))?;

    // fsblkcnt_t and the fragment size differ in width across platforms.
    #[allow(clippy::unnecessary_cast)]
    let fragment = stat.fragment_size() as u64;
    #[allow(clippy::unnecessary_cast)]
    let total = (stat.blocks() as u64).saturating_mul(fragment);
    #[allow(clippy::unnecessary_cast)]
    let free = (stat.blocks_available() as u64).saturating_mul(fragment);

    Ok(DiskSnapshot {
        free_bytes: free,
        total_bytes: total,
        used_bytes: total.saturating_sub(free),
    })
}

/// Non-Unix targets have no statvfs; report a structured failure instead of
/// guessing.
///
/// # Errors
///
/// Always returns [`crate::error::StorageError::Unsupported`].
#[cfg(not(unix))]
pub fn snapshot(path: &Path) -> StorageResult<DiskSnapshot> {
    use crate::error::StorageError;

    let _ = path;
    Err(StorageError::Unsupported {
        operation: "statvfs",
    })
}

#[cfg(all(unix, test))]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::path::PathBuf;

    #[test]
    fn snapshot_of_the_working_directory_is_consistent() -> anyhow::Result<()> {
        let here = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let snapshot = snapshot(&here)?;
        assert!(snapshot.total_bytes >= snapshot.free_bytes);
        assert_eq!(
            snapshot.used_bytes,
            snapshot.total_bytes - snapshot.free_bytes
        );
        Ok(())
    }

    #[test]
    fn missing_path_is_a_fatal_probe_failure() {
        let err = snapshot(Path::new("/definitely/not/a/mount/point"))
            .expect_err("missing path should fail");
        assert!(matches!(err, StorageError::Sys { operation, .. } if operation == "statvfs"));
    }
}
