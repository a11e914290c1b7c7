mod cli;
mod config;
mod storage;
mod tasks;
mod tui;

use clap::Parser;
use color_eyre::Result;
use tick_core::storage::KeyValueStore;
use tick_tasks::StoreTaskRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Entry point wiring the CLI to the store and the TUI.
fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command.unwrap_or(cli::Command::Tui) {
        cli::Command::Tui => run_tui(&config)?,
        cli::Command::Version => print_version(),
        cli::Command::Health => run_health_check(&config)?,
        cli::Command::Config(cli::ConfigCommand::Init) => init_config(&config)?,
        cli::Command::Task(cmd) => tasks::handle(cmd, &config)?,
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info. Logs go to stderr so
    // TUI frames on stdout stay clean.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("tick {}", env!("CARGO_PKG_VERSION"));
}

fn run_tui(config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let repo = StoreTaskRepo::new(store);
    let tasks = repo
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("failed to load tasks: {e}"))?;
    tui::launch(repo, tasks, config.starts_dark())
}

/// Runs a quick round-trip check of the storage path.
fn run_health_check(config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    run_store_health(&store)?;
    println!("Storage: ok");
    Ok(())
}

fn run_store_health<S: KeyValueStore>(store: &S) -> Result<()> {
    let probe_key = "health/probe";
    let payload = b"ok";
    store
        .put(probe_key, payload)
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    let round_trip = store
        .get(probe_key)
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    store
        .delete(probe_key)
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    if round_trip != payload {
        color_eyre::eyre::bail!("storage round-trip failed");
    }
    Ok(())
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
