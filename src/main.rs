use anyhow::Context;
use clap::Parser;
use koin::cli::Cli;
use koin::config::{Config, ConfigStore};
use koin::logging::{default_log_path, init_tracing};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::read_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if cli.lock_now {
        config.lock.enabled = true;
    }

    let filter = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.filter.clone());
    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    init_tracing(&filter, &log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating {}", config_path.display()))?;
    tracing::info!(
        config = %config_path.display(),
        lock_enabled = config.lock.enabled,
        method = ?config.lock.method,
        "Starting koin"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .context("building async runtime")?;

    let store = ConfigStore::new(config, config_path);
    let result = koin::ui::runtime::run(store, runtime.handle().clone());
    runtime.shutdown_background();

    if let Err(err) = &result {
        tracing::error!(error = %err, "UI exited with error");
    }
    result.context("running terminal UI")
}
