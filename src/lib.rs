// todostore - Single-user to-do list persisted in SQLite

pub mod config;
pub mod error;
pub mod filter;
pub mod jsonl;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use config::Config;
pub use error::{Result, StoreError};
pub use filter::SearchScope;
pub use store::TaskStore;
pub use task::Task;

// Re-export rusqlite for callers that need the raw error type
pub use rusqlite;
