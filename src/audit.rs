//! Audit trail for match requests
//!
//! Writes JSON lines to `~/.local/state/relmatch/audit.log`, one per match
//! call. A failed write is logged and otherwise ignored.

use crate::config::{schema::Config, ConfigManager};
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

/// Outcome of one match request
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub request_id: Uuid,
    pub release: String,
    pub version: String,
    pub requested: usize,
    pub matched: usize,
}

impl MatchRecord {
    pub fn new(release: &str, version: &str, requested: usize, matched: usize) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            release: release.to_string(),
            version: version.to_string(),
            requested,
            matched,
        }
    }
}

/// File-based audit logger that appends JSON lines
pub struct AuditLog {
    enabled: bool,
    path: PathBuf,
}

impl AuditLog {
    /// Create a new audit logger from config
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.general.audit_log,
            path: ConfigManager::audit_log_path(),
        }
    }

    /// Create an audit logger writing to an explicit path
    pub fn with_path(path: PathBuf, enabled: bool) -> Self {
        Self { enabled, path }
    }

    /// Log a match outcome as a JSON line
    pub async fn log(&self, event: &str, record: &MatchRecord) {
        if !self.enabled {
            return;
        }

        let entry = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event": event,
            "data": record,
        });

        let mut line = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize audit event: {}", e);
                return;
            }
        };
        line.push('\n');

        if let Err(e) = self.append(&line).await {
            warn!("Failed to write audit log {}: {}", self.path.display(), e);
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
