// Task record and field validation

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// Advisory maximum for task names; longer names are accepted with a warning
pub const DEFAULT_NAME_ADVISORY_LEN: usize = 50;

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Trim a task name and reject it if nothing is left
pub fn normalize_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Validation("name required".to_string()));
    }
    Ok(name.to_string())
}

/// Trim a description; empty is allowed
pub fn normalize_description(description: &str) -> String {
    description.trim().to_string()
}

/// Whether a name is longer than the advisory limit (counted in characters)
pub fn exceeds_advisory_len(name: &str, limit: usize) -> bool {
    name.chars().count() > limit
}
