//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "koin",
    version,
    about = "Personal finance tracker with a local app lock"
)]
pub struct Cli {
    /// Settings file (default: <config dir>/koin/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "koin::lock=trace".
    /// `KOIN_LOG` takes precedence.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log file (default: <data dir>/koin/koin.log).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Turn the app lock on for this run without changing saved settings.
    #[arg(long)]
    pub lock_now: bool,
}
