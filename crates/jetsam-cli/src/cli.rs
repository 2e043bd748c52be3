//! Argument parsing, dispatch, and exit-code mapping.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jetsam_config::{Config, ConfigError};
use jetsam_core::DaemonError;
use jetsam_telemetry::{LogFormat, LoggingConfig, init_logging};
use jetsam_transmission::DaemonClient;

use crate::commands;

const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Parses CLI arguments, wires logging from the configuration file, and
/// executes the requested command. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let config = jetsam_config::load(&cli.config_file)?;

    let logging = LoggingConfig {
        level: if cli.verbose { "debug" } else { "info" },
        format: LogFormat::infer(),
        log_file: config.logging.as_ref().map(jetsam_config::LoggingProfile::log_file),
    };
    init_logging(&logging).map_err(CliError::Failure)?;

    match cli.command {
        Command::Cleanup(args) => commands::cleanup::handle(&config, args).await,
        Command::Ls(args) => commands::list::handle(&config, args).await,
        Command::Reconcile(args) => commands::reconcile::handle(&config, args).await,
    }
}

#[derive(Parser)]
#[command(
    name = "jetsam",
    about = "Unattended disk-space reclamation for a torrent-transfer daemon"
)]
pub(crate) struct Cli {
    /// Configuration file to use.
    #[arg(
        short = 'f',
        long,
        global = true,
        env = "JETSAM_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub(crate) config_file: PathBuf,
    /// Enable debug-level logging.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Remove well-seeded transfers to lift free space back to the target.
    Cleanup(CleanupArgs),
    /// List the daemon's managed transfers.
    Ls(ListArgs),
    /// Detect on-disk entries the daemon no longer tracks, optionally
    /// deleting them.
    Reconcile(ReconcileArgs),
}

#[derive(Args)]
pub(crate) struct CleanupArgs {
    /// Selection strategy: stop at the free-space target, or sweep
    /// everything at or above the ratio floor.
    #[arg(long, value_enum, default_value_t = CleanupMode::FreeSpace)]
    pub(crate) mode: CleanupMode,
    /// Actually send the removal request; preview-only without this flag.
    #[arg(short = 'x', long)]
    pub(crate) execute: bool,
    /// Minimum seeding ratio considered safe to remove.
    #[arg(short = 'r', long)]
    pub(crate) min_ratio: Option<f64>,
    /// Free-space target in bytes.
    #[arg(short = 's', long)]
    pub(crate) min_free_space: Option<u64>,
    /// Mount point to probe; defaults to the configured download directory.
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CleanupMode {
    /// Free only as much as the target needs, cheapest transfers first.
    FreeSpace,
    /// Remove every transfer at or above the ratio floor.
    SeedRatio,
}

#[derive(Args)]
pub(crate) struct ListArgs {
    /// Column to sort by.
    #[arg(long, value_enum, default_value_t = SortKey::Id)]
    pub(crate) sort: SortKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortKey {
    /// Daemon-assigned identifier, ascending.
    Id,
    /// Transfer name, ascending.
    Name,
    /// Payload size, largest first.
    Size,
    /// Seed ratio, highest first.
    Ratio,
    /// Admission time, oldest first.
    Added,
}

#[derive(Args)]
pub(crate) struct ReconcileArgs {
    /// Actually delete orphaned entries; report-only without this flag.
    #[arg(short = 'x', long)]
    pub(crate) execute: bool,
    /// Directory to reconcile; defaults to the configured download
    /// directory.
    #[arg(long)]
    pub(crate) dir: Option<PathBuf>,
}

#[derive(Debug)]
pub(crate) enum CliError {
    /// Unusable flag combination or value; exit 2.
    Validation(String),
    /// Configuration file missing, malformed, or invalid; exit 3.
    Config(ConfigError),
    /// Transfer daemon unreachable or refusing the run; exit 4.
    Daemon(DaemonError),
    /// Any other fatal failure, reconciliation preconditions included;
    /// exit 5.
    Failure(anyhow::Error),
}

pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) => 3,
            Self::Daemon(_) => 4,
            Self::Failure(_) => 5,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Config(error) => render_chain(error),
            Self::Daemon(error) => render_chain(error),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

/// Flatten an error and its source chain into one line, the way anyhow's
/// alternate formatter renders its own chains.
fn render_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<DaemonError> for CliError {
    fn from(error: DaemonError) -> Self {
        Self::Daemon(error)
    }
}

pub(crate) fn build_client(config: &Config) -> CliResult<DaemonClient> {
    let daemon = &config.transfer_daemon;
    Ok(DaemonClient::new(
        &daemon.host,
        daemon.port,
        daemon.username.clone(),
        daemon.password.clone(),
    )?)
}
