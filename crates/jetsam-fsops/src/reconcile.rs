//! Orphan detection and best-effort destructive cleanup.
//!
//! # Design
//!
//! - Matching is exact-string and case-sensitive: a directory entry is
//!   tracked only when some transfer name is byte-identical to it.
//! - Deletions are per-entry and independent; one failure never aborts the
//!   batch, so partial completion is an expected outcome, not an error.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use jetsam_core::Transfer;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{StorageError, StorageResult};

/// On-disk entries with no corresponding tracked transfer name.
#[derive(Debug, Clone, Default)]
pub struct OrphanSet {
    /// Untracked entry names, sorted lexicographically.
    pub orphans: Vec<String>,
    /// Total number of directory entries compared.
    pub directory_entries: usize,
    /// Number of transfers the comparison ran against.
    pub tracked_transfers: usize,
}

impl OrphanSet {
    /// Whether the directory held no untracked entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orphans.is_empty()
    }

    /// Number of orphaned entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orphans.len()
    }
}

/// Per-entry outcome of a destructive reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct ReconcileResult {
    /// Entries successfully deleted.
    pub removed: Vec<String>,
    /// Entries that could not be deleted; logged and skipped.
    pub failed: Vec<String>,
    /// Bytes freed by the deletions that succeeded.
    pub bytes_reclaimed: u64,
}

/// Verify the reconciliation preconditions for `base_dir`: it must exist,
/// be a directory, and be readable and traversable. Checked once up front —
/// no transfer-to-disk comparison is meaningful without a listing.
///
/// # Errors
///
/// Returns [`StorageError::Precondition`] when any requirement fails; this
/// is fatal for the whole reconciliation, not per-entry.
pub fn ensure_reconcilable(base_dir: &Path) -> StorageResult<()> {
    let metadata = fs::metadata(base_dir)
        .map_err(|_| StorageError::precondition(base_dir, "missing_or_unreadable"))?;
    if !metadata.is_dir() {
        return Err(StorageError::precondition(base_dir, "not_a_directory"));
    }

    #[cfg(unix)]
    {
        use nix::unistd::{AccessFlags, access};

        access(base_dir, AccessFlags::R_OK | AccessFlags::X_OK)
            .map_err(|_| StorageError::precondition(base_dir, "not_traversable"))?;
    }

    Ok(())
}

/// List entry names one level deep, non-recursive, names only.
///
/// Entries with non-UTF-8 names are carried lossily; they can never match a
/// transfer name and therefore surface as orphans.
///
/// # Errors
///
/// Returns an IO error when the directory cannot be read or an entry cannot
/// be inspected.
pub fn list_entries(base_dir: &Path) -> StorageResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in
        fs::read_dir(base_dir).map_err(|source| StorageError::io("read_dir", base_dir, source))?
    {
        let entry =
            entry.map_err(|source| StorageError::io("read_dir_entry", base_dir, source))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Set-difference between the directory listing and the tracked transfer
/// names. Pure; nothing on disk is touched.
#[must_use]
pub fn diff(transfers: &[Transfer], directory_entries: &[String]) -> OrphanSet {
    let tracked: HashSet<&str> = transfers
        .iter()
        .map(|transfer| transfer.name.as_str())
        .collect();

    let mut orphans: Vec<String> = directory_entries
        .iter()
        .filter(|entry| !tracked.contains(entry.as_str()))
        .cloned()
        .collect();
    orphans.sort();

    OrphanSet {
        orphans,
        directory_entries: directory_entries.len(),
        tracked_transfers: transfers.len(),
    }
}

/// Best-effort recursive size of one entry, for reporting. Traversal errors
/// are skipped; the number is an audit aid, not an accounting guarantee.
#[must_use]
pub fn entry_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter_map(|entry| entry.metadata().ok())
        .filter(std::fs::Metadata::is_file)
        .map(|metadata| metadata.len())
        .sum()
}

/// Delete orphaned entries under `base_dir`. With `execute` unset nothing is
/// touched and an empty result is returned — the orphan set itself is the
/// report. With it set, plain files are unlinked and directories removed
/// recursively; each deletion is independent and a failure is logged and
/// skipped, never fatal.
#[must_use]
pub fn reconcile(orphans: &OrphanSet, base_dir: &Path, execute: bool) -> ReconcileResult {
    let mut result = ReconcileResult::default();
    if !execute {
        return result;
    }

    for name in &orphans.orphans {
        let path = base_dir.join(name);
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(
                    error = %err,
                    path = %path.display(),
                    "failed to inspect orphan entry"
                );
                result.failed.push(name.clone());
                continue;
            }
        };

        let size = entry_size(&path);
        let outcome = if metadata.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        match outcome {
            Ok(()) => {
                info!(path = %path.display(), bytes = size, "removed orphan entry");
                result.removed.push(name.clone());
                result.bytes_reclaimed = result.bytes_reclaimed.saturating_add(size);
            }
            Err(err) => {
                warn!(
                    error = %err,
                    path = %path.display(),
                    "failed to remove orphan entry"
                );
                result.failed.push(name.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jetsam_core::{TransferId, TransferStatus};
    use std::fs::File;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn tracked(name: &str) -> Transfer {
        Transfer {
            id: TransferId(1),
            name: name.to_string(),
            total_size_bytes: 0,
            ratio: 0.0,
            added_at: Utc::now(),
            progress: 1.0,
            status: TransferStatus::Seeding,
        }
    }

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> anyhow::Result<()> {
        let mut file = File::create(dir.join(name))?;
        file.write_all(contents)?;
        Ok(())
    }

    #[test]
    fn diff_reports_untracked_entries_sorted() {
        let transfers = vec![tracked("A"), tracked("B")];
        let entries = vec!["C".to_string(), "A".to_string(), "B".to_string()];
        let set = diff(&transfers, &entries);
        assert_eq!(set.orphans, vec!["C"]);
        assert_eq!(set.directory_entries, 3);
        assert_eq!(set.tracked_transfers, 2);
    }

    #[test]
    fn diff_of_an_empty_directory_is_empty() {
        let set = diff(&[tracked("A")], &[]);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn diff_matching_is_case_sensitive() {
        let set = diff(&[tracked("A")], &["a".to_string()]);
        assert_eq!(set.orphans, vec!["a"]);
    }

    #[test]
    fn list_entries_is_one_level_deep() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_file(dir.path(), "loose.bin", b"x")?;
        fs::create_dir(dir.path().join("bundle"))?;
        write_file(&dir.path().join("bundle"), "nested.bin", b"y")?;

        let mut names = list_entries(dir.path())?;
        names.sort();
        assert_eq!(names, vec!["bundle", "loose.bin"]);
        Ok(())
    }

    #[test]
    fn preview_mode_touches_nothing() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_file(dir.path(), "orphan.bin", b"payload")?;
        let set = diff(&[], &list_entries(dir.path())?);

        let result = reconcile(&set, dir.path(), false);
        assert!(result.removed.is_empty());
        assert!(result.failed.is_empty());
        assert!(dir.path().join("orphan.bin").exists());
        Ok(())
    }

    #[test]
    fn execute_removes_files_and_directories_independently() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_file(dir.path(), "orphan.bin", b"12345")?;
        let nested = dir.path().join("orphan-dir");
        fs::create_dir(&nested)?;
        write_file(&nested, "inner.bin", b"123")?;

        let set = OrphanSet {
            orphans: vec![
                "gone-before-delete".to_string(),
                "orphan-dir".to_string(),
                "orphan.bin".to_string(),
            ],
            directory_entries: 3,
            tracked_transfers: 0,
        };

        let result = reconcile(&set, dir.path(), true);
        assert_eq!(result.removed, vec!["orphan-dir", "orphan.bin"]);
        assert_eq!(result.failed, vec!["gone-before-delete"]);
        assert_eq!(result.bytes_reclaimed, 8);
        assert!(!dir.path().join("orphan.bin").exists());
        assert!(!nested.exists());
        Ok(())
    }

    #[test]
    fn entry_size_sums_nested_files() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let bundle = dir.path().join("bundle");
        fs::create_dir(&bundle)?;
        write_file(&bundle, "one.bin", b"1234")?;
        write_file(&bundle, "two.bin", b"56")?;
        assert_eq!(entry_size(&bundle), 6);
        Ok(())
    }

    #[test]
    fn missing_base_dir_fails_the_precondition() {
        let err = ensure_reconcilable(Path::new("/no/such/download/root"))
            .expect_err("missing directory must fail");
        assert!(matches!(err, StorageError::Precondition { .. }));
    }

    #[test]
    fn file_base_dir_fails_the_precondition() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write_file(dir.path(), "plain.bin", b"x")?;
        let err = ensure_reconcilable(&dir.path().join("plain.bin"))
            .expect_err("plain file must fail");
        assert!(matches!(
            err,
            StorageError::Precondition { reason, .. } if reason == "not_a_directory"
        ));
        Ok(())
    }

    #[test]
    fn readable_directory_passes_the_precondition() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        ensure_reconcilable(dir.path())?;
        Ok(())
    }
}
