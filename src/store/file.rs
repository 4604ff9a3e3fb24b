//! File-backed record store
//!
//! Reads a records document written by the upload pipeline. The document is
//! re-read for every snapshot; a single read is the consistency unit.

use crate::error::{RelmatchError, RelmatchResult};
use crate::store::lookup::{RecordSnapshot, RecordStore, RecordsSnapshot};
use crate::store::records::Records;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// Record store reading a JSON or TOML document from disk
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and validate the records document
    pub async fn load(&self) -> RelmatchResult<Records> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            RelmatchError::store_unavailable(
                self.backend_name(),
                format!("reading {}: {}", self.path.display(), e),
            )
        })?;

        let records = parse_records(&self.path, &content)?;
        records
            .validate()
            .map_err(|reason| RelmatchError::StoreCorrupt {
                path: self.path.clone(),
                reason,
            })?;

        debug!(
            "Loaded {} release versions, {} packages, {} compiled packages from {}",
            records.release_versions.len(),
            records.packages.len(),
            records.compiled_packages.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Write a records document, in the format implied by the extension
    pub async fn save(&self, records: &Records) -> RelmatchResult<()> {
        let content = if is_toml(&self.path) {
            toml::to_string_pretty(records)?
        } else {
            serde_json::to_string_pretty(records)?
        };
        fs::write(&self.path, content)
            .await
            .map_err(|e| RelmatchError::io(format!("writing {}", self.path.display()), e))
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

fn parse_records(path: &Path, content: &str) -> RelmatchResult<Records> {
    let parsed = if is_toml(path) {
        toml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| RelmatchError::StoreCorrupt {
        path: path.to_path_buf(),
        reason,
    })
}

#[async_trait]
impl RecordStore for FileStore {
    async fn snapshot(&self) -> RelmatchResult<Box<dyn RecordSnapshot>> {
        let records = self.load().await?;
        Ok(Box::new(RecordsSnapshot::new(Arc::new(records))))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
