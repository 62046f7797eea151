//! JSONL run ledger: one line per dispatched action.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// One ledger line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: String,
    pub action: String,
    pub tenant_id: String,
    pub duration_ms: u64,
    /// `ok` or `error`.
    pub status: String,
    pub items_requested: usize,
    pub items_succeeded: usize,
    pub items_failed: usize,
}

impl RunRecord {
    pub fn new(action: &str, tenant_id: &str, duration_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            tenant_id: tenant_id.to_string(),
            duration_ms,
            status: "ok".to_string(),
            items_requested: 0,
            items_succeeded: 0,
            items_failed: 0,
        }
    }

    pub fn counts(mut self, requested: usize, succeeded: usize, failed: usize) -> Self {
        self.items_requested = requested;
        self.items_succeeded = succeeded;
        self.items_failed = failed;
        self
    }

    pub fn failed(mut self) -> Self {
        self.status = "error".to_string();
        self
    }
}

/// Append-only JSONL ledger, shared across request handlers.
pub struct RunLedger {
    file: Mutex<File>,
}

impl RunLedger {
    /// Open or create the ledger file.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open run ledger: {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub fn record(&self, record: &RunRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow!("run ledger lock poisoned"))?;
        writeln!(file, "{json}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("ledger.jsonl");
        let ledger = RunLedger::open(&path).unwrap();
        ledger
            .record(&RunRecord::new("verify_contacts", "t1", 42).counts(3, 2, 1))
            .unwrap();
        ledger
            .record(&RunRecord::new("scrape_outlet", "t1", 7).failed())
            .unwrap();
        drop(ledger);

        let reopened = RunLedger::open(&path).unwrap();
        reopened
            .record(&RunRecord::new("monitor_updates", "t2", 0))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<RunRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].items_failed, 1);
        assert_eq!(lines[1].status, "error");
        assert_eq!(lines[2].tenant_id, "t2");
    }
}
