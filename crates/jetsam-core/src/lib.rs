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

//! Daemon-agnostic domain types and the retention decision logic.
//!
//! Layout: `model.rs` (transfer and disk-space value objects), `policy.rs`
//! (removal-plan computation), `format.rs` (byte rendering), `service.rs`
//! (collaborator traits implemented by daemon adapters).

pub mod error;
pub mod format;
pub mod model;
pub mod policy;
pub mod service;

pub use error::{DaemonError, DaemonResult};
pub use format::{human_size, human_size_with};
pub use model::{
    DiskSnapshot, PolicyConfig, RemovalPlan, SelectedTransfer, Transfer, TransferId,
    TransferStatus, DEFAULT_MIN_FREE_SPACE_BYTES,
};
pub use policy::{plan, plan_by_ratio};
pub use service::{RemovalExecutor, TransferSource};
