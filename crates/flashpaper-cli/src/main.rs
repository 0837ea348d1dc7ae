//! Flashpaper CLI - share text that burns after reading.

use clap::Parser;
use flashpaper_cli::commands;
use flashpaper_cli::{Cli, Command, Config, Formatter};
use flashpaper_store::SqliteStore;
use std::fs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> flashpaper_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Keygen edits the file itself, so it must not persist environment overrides
    if let Command::Keygen(args) = cli.command {
        let path = match cli.config {
            Some(path) => path,
            None => Config::path()?,
        };
        let mut config = if path.exists() {
            Config::load_from(&path)?
        } else {
            Config::default()
        };
        let formatter = Formatter::new(config.settings.format, !cli.no_color && config.settings.color);
        return commands::execute_keygen(args, &mut config, &path, &formatter);
    }

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // The key is checked before the database is touched
    let cipher = config.cipher()?;
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut store = SqliteStore::open_with(&config.database_path, cipher, config.store_options())?;
    tracing::debug!(database = %config.database_path.display(), "store opened");

    match cli.command {
        Command::Create(args) => commands::execute_create(args, &mut store, &formatter)?,
        Command::Read(args) => commands::execute_read(args, &mut store, &formatter)?,
        Command::Delete(args) => commands::execute_delete(args, &mut store, &formatter)?,
        Command::Stats(args) => commands::execute_stats(args, &store, &formatter)?,
        Command::List(args) => commands::execute_list(args, &store, &formatter)?,
        Command::Sweep(args) => {
            commands::execute_sweep(args, &config.janitor, &mut store, &formatter)?
        }
        Command::Janitor => {
            commands::execute_janitor(&config.janitor, &mut store, &formatter).await?
        }
        // Handled before the store is opened
        Command::Keygen(_) => {}
    }

    Ok(())
}
