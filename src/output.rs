//! Page handoff sinks
//!
//! Downstream storage receives each fully fetched page's item list as one
//! atomic unit: a page is either handed off completely or not at all. The
//! JSON-lines writer lands one file per page in a local directory.

use crate::error::{Error, Result};
use chrono::Utc;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Receives one page's items at a time
pub trait Sink {
    /// Hand off a full page of records. Returns the path the page landed
    /// at, for logging.
    fn write_page(&mut self, resource: &str, records: &[Value]) -> Result<PathBuf>;
}

/// Writes each page as a JSON-lines file
#[derive(Debug)]
pub struct JsonlWriter {
    dir: PathBuf,
    pages_written: u64,
}

impl JsonlWriter {
    /// Create a writer, creating the output directory if needed
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| Error::Output {
            message: format!("Failed to create output directory: {e}"),
        })?;
        Ok(Self {
            dir,
            pages_written: 0,
        })
    }

    /// Number of pages written so far
    pub fn pages_written(&self) -> u64 {
        self.pages_written
    }
}

impl Sink for JsonlWriter {
    fn write_page(&mut self, resource: &str, records: &[Value]) -> Result<PathBuf> {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        let path = self.dir.join(format!(
            "{resource}_{timestamp}_{:05}.jsonl",
            self.pages_written
        ));

        let mut contents = String::new();
        for record in records {
            contents.push_str(&serde_json::to_string(record)?);
            contents.push('\n');
        }

        // Temp file + rename keeps the handoff atomic.
        let temp_path = path.with_extension("jsonl.tmp");
        std::fs::write(&temp_path, contents).map_err(|e| Error::Output {
            message: format!("Failed to write page file: {e}"),
        })?;
        std::fs::rename(&temp_path, &path).map_err(|e| Error::Output {
            message: format!("Failed to rename page file: {e}"),
        })?;

        self.pages_written += 1;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_write_page_one_record_per_line() {
        let dir = tempdir().unwrap();
        let mut writer = JsonlWriter::new(dir.path()).unwrap();

        let records = vec![json!({"id": "e1"}), json!({"id": "e2"})];
        let path = writer.write_page("events", &records).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            serde_json::from_str::<Value>(lines[0]).unwrap(),
            json!({"id": "e1"})
        );
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("events_"));
    }

    #[test]
    fn test_write_page_names_are_sequential() {
        let dir = tempdir().unwrap();
        let mut writer = JsonlWriter::new(dir.path()).unwrap();

        let p1 = writer.write_page("events", &[json!({"id": 1})]).unwrap();
        let p2 = writer.write_page("events", &[json!({"id": 2})]).unwrap();

        assert_ne!(p1, p2);
        assert_eq!(writer.pages_written(), 2);
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out/pages");
        let _writer = JsonlWriter::new(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
