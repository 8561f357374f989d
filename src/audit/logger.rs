//! Append-only JSON-lines audit log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{DericerError, DericerResult};

use super::entry::AuditEntry;

/// Writes audit entries to a JSONL file, one entry per line
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Append one entry and flush
    pub fn log(&self, entry: &AuditEntry) -> DericerResult<()> {
        self.log_batch(std::slice::from_ref(entry))
    }

    /// Append several entries with a single open and flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> DericerResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut buffer = String::new();
        for entry in entries {
            let line = serde_json::to_string(entry)
                .map_err(|e| DericerError::Json(format!("Failed to serialize audit entry: {}", e)))?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| DericerError::Io(format!("Failed to open audit log: {}", e)))?;

        file.write_all(buffer.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| DericerError::Io(format!("Failed to write audit log: {}", e)))?;

        tracing::trace!(count = entries.len(), "appended audit entries");
        Ok(())
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> DericerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| DericerError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                DericerError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                DericerError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    index + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> DericerResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}
