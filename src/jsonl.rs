// JSONL export

use crate::error::Result;
use fs2::FileExt;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write records to a JSONL file, one JSON object per line
///
/// Any existing file is truncated. An exclusive lock is held on the file
/// while writing, and the data is synced to disk before the lock is released.
/// Returns the number of records written.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<usize> {
    let file = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;

    file.lock_exclusive()?;

    let mut writer = BufWriter::new(&file);
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;
    drop(writer);
    file.sync_all()?;

    debug!(file = ?path, count = records.len(), "write_jsonl: done");

    // Lock is released when file is dropped
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Line {
        id: i64,
        name: String,
    }

    #[test]
    fn test_write_jsonl() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.jsonl");

        let records = vec![
            Line {
                id: 1,
                name: "one".to_string(),
            },
            Line {
                id: 2,
                name: "two".to_string(),
            },
        ];

        let count = write_jsonl(&path, &records).unwrap();
        assert_eq!(count, 2);

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<Line> = content.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_write_jsonl_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.jsonl");
        fs::write(&path, "stale line\nanother\nand another\n").unwrap();

        let records = vec![Line {
            id: 9,
            name: "fresh".to_string(),
        }];
        write_jsonl(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_write_jsonl_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.jsonl");

        let records: Vec<Line> = Vec::new();
        assert_eq!(write_jsonl(&path, &records).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
