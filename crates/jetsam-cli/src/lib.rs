//! Command-line driver for jetsam: unattended disk-space reclamation and
//! reconciliation against a Transmission-compatible torrent daemon.

pub mod cli;
mod commands;
mod output;

pub use cli::run;
