#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

//! Ground-truth reconciliation between the daemon's transfer list and the
//! download directory, plus the disk-space probe the retention policy runs
//! against.
//!
//! Layout: `probe.rs` (statvfs snapshot), `reconcile.rs` (orphan diff and
//! best-effort destructive cleanup), `error.rs` (structured failures).

pub mod error;
pub mod probe;
pub mod reconcile;

pub use error::{StorageError, StorageResult};
pub use reconcile::{OrphanSet, ReconcileResult};
