use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use std::path::Path;
use todostore::{Config, TaskStore};
use tracing::Level;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let mut config = Config::load(cli.config.as_ref())?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(scope) = cli.scope {
        config.search_scope = scope;
    }

    // Open store
    let mut store = TaskStore::open(&config.db_path)
        .context(format!("Failed to open task database at {}", config.db_path.display()))?
        .with_search_scope(config.search_scope)
        .with_name_advisory_len(config.name_advisory_len);

    let db_path = store.path().map(Path::to_path_buf);
    let outcome = cli::run(&cli.command, &mut store);
    let closed = store.close();

    if outcome.as_ref().is_err_and(cli::is_storage_failure) {
        let location = db_path.as_deref().unwrap_or(config.db_path.as_path());
        eprintln!(
            "{} the task database at {} could not be read or written",
            "Storage failure:".red(),
            location.display()
        );
    }

    cli::finish(outcome, closed)
}
