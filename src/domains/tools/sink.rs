//! Invocation logging sinks.
//!
//! Every invocation produces one [`InvocationRecord`]. The dispatcher hands
//! it to each configured sink; a sink that fails is reported and skipped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

use crate::core::{Error, Result};

/// Structured log entry for one invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRecord {
    pub timestamp: DateTime<Utc>,
    pub tool: String,
    pub duration_ms: f64,
    pub success: bool,
    /// Payload length on success, failure message otherwise.
    pub detail: String,
}

/// Destination for invocation records.
pub trait InvocationSink: Send + Sync {
    fn record(&self, record: &InvocationRecord) -> Result<()>;
}

/// Emits records as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl InvocationSink for TracingSink {
    fn record(&self, record: &InvocationRecord) -> Result<()> {
        if record.success {
            info!(
                tool = %record.tool,
                duration_ms = record.duration_ms,
                success = true,
                "Tool {} executed successfully ({})",
                record.tool,
                record.detail
            );
        } else {
            warn!(
                tool = %record.tool,
                duration_ms = record.duration_ms,
                success = false,
                "Tool {} failed: {}",
                record.tool,
                record.detail
            );
        }
        Ok(())
    }
}

/// Appends records as JSON lines to a file.
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlSink {
    /// Open (or create) the log file for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationSink for JsonlSink {
    fn record(&self, record: &InvocationRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self
            .file
            .lock()
            .map_err(|_| Error::internal("invocation log lock poisoned"))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(success: bool) -> InvocationRecord {
        InvocationRecord {
            timestamp: Utc::now(),
            tool: "echo".to_string(),
            duration_ms: 0.25,
            success,
            detail: "5 bytes".to_string(),
        }
    }

    #[test]
    fn test_tracing_sink_never_fails() {
        assert!(TracingSink.record(&record(true)).is_ok());
        assert!(TracingSink.record(&record(false)).is_ok());
    }

    #[test]
    fn test_jsonl_sink_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invocations.jsonl");

        let sink = JsonlSink::open(&path).unwrap();
        sink.record(&record(true)).unwrap();
        sink.record(&record(false)).unwrap();
        assert_eq!(sink.path(), path.as_path());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["tool"], "echo");
        assert_eq!(first["success"], true);
        assert_eq!(first["durationMs"], 0.25);
        assert!(first["timestamp"].is_string());
    }

    #[test]
    fn test_jsonl_sink_open_fails_for_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("log.jsonl");
        assert!(JsonlSink::open(path).is_err());
    }
}
