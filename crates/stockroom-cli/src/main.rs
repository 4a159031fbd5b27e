//! Stockroom CLI entry point.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use stockroom_cli::cli::{Cli, Commands};
use stockroom_cli::commands;
use stockroom_cli::config;
use stockroom_cli::menu::Menu;
use stockroom_persistence::Store;

fn main() {
    // Load .env.local if it exists (for STOCKROOM_FILE etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::Result<()> {
    let config = cli.store_config();
    let (mut store, report) = Store::open(&config.path, config.format, config.options)?;
    info!(
        path = %store.path().display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "Inventory opened"
    );

    match &cli.command {
        Some(Commands::Menu) | None => run_menu(store),
        Some(cmd) => commands::execute(cmd, &mut store),
    }
}

fn run_menu(store: Store) -> commands::Result<()> {
    let mut menu = Menu::new(store, Some(config::history_path()))?;
    menu.run()?;
    Ok(())
}
