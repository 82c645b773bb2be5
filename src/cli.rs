//! Command-line shell over the task store.
//!
//! Each invocation runs exactly one store operation and renders the result.

use clap::{Parser, Subcommand};
use colored::*;
use eyre::{Context, Result};
use std::path::PathBuf;
use todostore::{SearchScope, StoreError, Task, TaskStore};
use tracing::warn;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Single-user to-do list manager backed by SQLite")]
#[command(version = env!("GIT_DESCRIBE"))]
pub struct Cli {
    /// Path to the SQLite database (overrides config)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Columns matched by search: all or name (overrides config)
    #[arg(long)]
    pub scope: Option<SearchScope>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search tasks by substring
    Search {
        query: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single task
    Show { id: i64 },

    /// Replace a task's name and description
    Update {
        id: i64,

        name: String,

        /// New description; the current one is kept when omitted
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a task
    Delete { id: i64 },

    /// Export all tasks to a JSONL file
    Export { file: PathBuf },
}

pub fn run(command: &Commands, store: &mut TaskStore) -> Result<()> {
    match command {
        Commands::Add { name, description } => {
            let task = store.create(name, description).context("Failed to add task")?;
            println!("{} Added task {}", "✓".green(), task.id);
            print_tasks(&store.list_all()?);
        }
        Commands::List { json } => {
            let tasks = store.list_all()?;
            if *json {
                print_json(&tasks)?;
            } else {
                print_tasks(&tasks);
            }
        }
        Commands::Search { query, json } => {
            let tasks = search_tasks(store, query)?;
            if *json {
                print_json(&tasks)?;
            } else if tasks.is_empty() {
                println!("{}", "No matching tasks".yellow());
            } else {
                print_tasks(&tasks);
            }
        }
        Commands::Show { id } => {
            let task = store.get(*id)?;
            println!("{:<12} {}", "ID:".bold(), task.id);
            println!("{:<12} {}", "Name:".bold(), task.name);
            println!("{:<12} {}", "Description:".bold(), task.description);
        }
        Commands::Update { id, name, description } => {
            let description = match description {
                Some(description) => description.clone(),
                None => store.get(*id)?.description,
            };
            let task = store
                .update(*id, name, &description)
                .context(format!("Failed to update task {}", id))?;
            println!("{} Updated task {}", "✓".green(), task.id);
            print_tasks(&store.list_all()?);
        }
        Commands::Delete { id } => {
            store.delete(*id).context(format!("Failed to delete task {}", id))?;
            println!("{} Deleted task {}", "✓".green(), id);
            print_tasks(&store.list_all()?);
        }
        Commands::Export { file } => {
            let count = store
                .export_jsonl(file)
                .context(format!("Failed to export to {}", file.display()))?;
            println!("{} Exported {} tasks to {}", "✓".green(), count, file.display());
        }
    }

    Ok(())
}

/// Combine a command's outcome with the result of closing the store
///
/// A failed command keeps its own error; a close failure is then only logged.
pub fn finish(outcome: Result<()>, closed: todostore::Result<()>) -> Result<()> {
    match (outcome, closed) {
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "Failed to close task database");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), closed) => closed.context("Failed to close task database"),
    }
}

/// Search with surrounding whitespace stripped from the query
fn search_tasks(store: &TaskStore, query: &str) -> Result<Vec<Task>> {
    Ok(store.search(query.trim())?)
}

/// Whether a shell error was caused by the backing store rather than user input
pub fn is_storage_failure(err: &eyre::Report) -> bool {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StoreError>())
        .is_some_and(StoreError::is_storage)
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks".dimmed());
        return;
    }

    println!("{}", format!("{:>4}  {:<30}  {}", "ID", "Task Name", "Task Description").as_str().bold());
    for task in tasks {
        println!("{:>4}  {:<30}  {}", task.id, task.name, task.description);
    }
}

fn print_json(tasks: &[Task]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(tasks)?);
    Ok(())
}
