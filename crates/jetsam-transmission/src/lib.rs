//! Transmission-compatible RPC adapter.
//!
//! Implements the [`jetsam_core::TransferSource`] and
//! [`jetsam_core::RemovalExecutor`] collaborator traits over the daemon's
//! JSON-RPC-over-HTTP protocol, including the `X-Transmission-Session-Id`
//! CSRF handshake.

pub mod client;

pub use client::DaemonClient;
