//! Output sinks for finished collections
//!
//! A sink receives the complete, deduplicated collection exactly once.

use crate::domain::{BulkError, Record, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination of a finished collection
#[async_trait]
pub trait RecordSink: Send {
    async fn deliver(&mut self, records: Vec<Record>) -> Result<()>;
}

/// Writes the collection as one JSON array
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSink for JsonFileSink {
    async fn deliver(&mut self, records: Vec<Record>) -> Result<()> {
        let json = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                BulkError::Io(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            BulkError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "The file was saved!"
        );
        Ok(())
    }
}

/// Prints the record count and the comma-joined ids
pub struct IdListSink<W> {
    writer: W,
    noun: &'static str,
}

impl IdListSink<std::io::Stdout> {
    pub fn stdout(noun: &'static str) -> Self {
        Self::new(std::io::stdout(), noun)
    }
}

impl<W: Write + Send> IdListSink<W> {
    pub fn new(writer: W, noun: &'static str) -> Self {
        Self { writer, noun }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> RecordSink for IdListSink<W> {
    async fn deliver(&mut self, records: Vec<Record>) -> Result<()> {
        let ids: Vec<String> = records
            .iter()
            .map(|r| r.id().unwrap_or_default())
            .collect();

        writeln!(self.writer, "Found {} {}", records.len(), self.noun)?;
        writeln!(self.writer, "{}", ids.join(","))?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_json_file_sink_writes_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("tickets_exported.json");
        let mut sink = JsonFileSink::new(&path);

        sink.deliver(vec![
            Record::new(json!({"id": 1})),
            Record::new(json!({"id": 2})),
        ])
        .await
        .unwrap();

        let written: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written, json!([{"id": 1}, {"id": 2}]));
    }

    #[tokio::test]
    async fn test_id_list_sink() {
        let mut sink = IdListSink::new(Vec::new(), "tickets");
        sink.deliver(vec![
            Record::new(json!({"id": 10})),
            Record::new(json!({"id": 11})),
        ])
        .await
        .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "Found 2 tickets\n10,11\n");
    }
}
