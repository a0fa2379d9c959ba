//! `tracing` subscriber setup.
//!
//! The terminal belongs to the UI, so log lines go to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable overriding every other filter source.
pub const LOG_ENV: &str = "KOIN_LOG";

/// Default log file: `<data_local_dir>/koin/koin.log`.
pub fn default_log_path() -> PathBuf {
    let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_dir.join("koin").join("koin.log")
}

/// Build the filter: `KOIN_LOG`, else `fallback`.
pub fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber writing to `path`.
pub fn init_tracing(filter: &str, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_expected() {
        assert!(default_log_path().ends_with("koin/koin.log"));
    }

    #[test]
    fn second_install_reports_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("koin.log");
        let _ = init_tracing("info", &path);
        assert!(path.exists());

        let err = init_tracing("info", &path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
