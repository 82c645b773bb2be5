// Task store over a single SQLite table

use crate::error::{Result, StoreError};
use crate::filter::SearchScope;
use crate::jsonl;
use crate::task::{DEFAULT_NAME_ADVISORY_LEN, Task, exceeds_advisory_len, normalize_description, normalize_name};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Durable CRUD and substring search over tasks
pub struct TaskStore {
    db_path: Option<PathBuf>,
    db: Connection,
    scope: SearchScope,
    name_advisory_len: usize,
}

impl TaskStore {
    /// Open or create a store backed by the SQLite file at `path`
    ///
    /// The parent directory is created if it doesn't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let db = Connection::open(&db_path)?;
        info!(path = ?db_path, "Opened task database");

        Self::from_connection(db, Some(db_path))
    }

    /// Open a private in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory()?;
        Self::from_connection(db, None)
    }

    fn from_connection(db: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        let store = Self {
            db_path,
            db,
            scope: SearchScope::default(),
            name_advisory_len: DEFAULT_NAME_ADVISORY_LEN,
        };
        store.create_schema()?;
        Ok(store)
    }

    /// Set which columns `search` matches against
    pub fn with_search_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the advisory name length; longer names are stored but logged
    pub fn with_name_advisory_len(mut self, len: usize) -> Self {
        self.name_advisory_len = len;
        self
    }

    /// Path of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating database schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT
            );
            "#,
        )?;

        Ok(())
    }

    // ========================================================================
    // CRUD API
    // ========================================================================

    /// Create a new task and return it with its assigned id
    pub fn create(&mut self, name: &str, description: &str) -> Result<Task> {
        let name = normalize_name(name)?;
        let description = normalize_description(description);
        self.warn_if_long(&name);

        self.db.execute(
            "INSERT INTO tasks (name, description) VALUES (?1, ?2)",
            params![name, description],
        )?;
        let id = self.db.last_insert_rowid();

        debug!(id, name = %name, "create: inserted task");
        Ok(Task { id, name, description })
    }

    /// Get a task by id
    pub fn get(&self, id: i64) -> Result<Task> {
        self.db
            .query_row(
                "SELECT id, name, description FROM tasks WHERE id = ?1",
                [id],
                Self::task_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    /// List every task, ordered by id
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .db
            .prepare("SELECT id, name, description FROM tasks ORDER BY id")?;

        let rows = stmt.query_map([], Self::task_from_row)?;
        let tasks = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Find tasks containing `query` as a case-sensitive substring
    ///
    /// The columns searched depend on the store's `SearchScope`. An empty
    /// query returns every task. No match is an empty result, not an error.
    pub fn search(&self, query: &str) -> Result<Vec<Task>> {
        if query.is_empty() {
            return self.list_all();
        }

        let sql = format!(
            "SELECT id, name, description FROM tasks WHERE {} ORDER BY id",
            self.scope.to_sql()
        );
        let mut stmt = self.db.prepare(&sql)?;

        let rows = stmt.query_map([query], Self::task_from_row)?;
        let tasks = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(query, scope = %self.scope, matches = tasks.len(), "search: done");
        Ok(tasks)
    }

    /// Replace a task's name and description; the id is unchanged
    pub fn update(&mut self, id: i64, name: &str, description: &str) -> Result<Task> {
        let name = normalize_name(name)?;
        let description = normalize_description(description);
        self.warn_if_long(&name);

        let changed = self.db.execute(
            "UPDATE tasks SET name = ?1, description = ?2 WHERE id = ?3",
            params![name, description, id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        debug!(id, name = %name, "update: replaced task");
        Ok(Task { id, name, description })
    }

    /// Permanently delete a task
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self.db.execute("DELETE FROM tasks WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        debug!(id, "delete: removed task");
        Ok(())
    }

    /// Number of stored tasks
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.db.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Write every task to `path` as JSONL; returns the number written
    pub fn export_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let tasks = self.list_all()?;
        let count = jsonl::write_jsonl(path.as_ref(), &tasks)?;
        info!(path = ?path.as_ref(), count, "Exported tasks");
        Ok(count)
    }

    /// Close the database connection, flushing pending writes
    pub fn close(self) -> Result<()> {
        let path = self.db_path;
        self.db.close().map_err(|(_, e)| StoreError::Storage(e))?;
        info!(path = ?path, "Closed task database");
        Ok(())
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        })
    }

    fn warn_if_long(&self, name: &str) {
        if exceeds_advisory_len(name, self.name_advisory_len) {
            warn!(
                len = name.chars().count(),
                limit = self.name_advisory_len,
                "Task name exceeds advisory length"
            );
        }
    }
}
