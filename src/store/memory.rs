//! In-memory record store
//!
//! Holds records behind a copy-on-write `Arc`. Taking a snapshot clones the
//! `Arc`; writers replace it, so open snapshots keep the view they started
//! with.

use crate::error::RelmatchResult;
use crate::store::lookup::{RecordSnapshot, RecordStore, RecordsSnapshot};
use crate::store::records::Records;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Record store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Arc<Records>>,
}

impl MemoryStore {
    pub fn new(records: Records) -> Self {
        Self {
            records: RwLock::new(Arc::new(records)),
        }
    }

    /// Apply a write from the upload side
    pub async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Records) -> T,
    {
        let mut guard = self.records.write().await;
        let out = f(Arc::make_mut(&mut guard));
        debug!(
            "Memory store updated: {} packages, {} compiled packages",
            guard.packages.len(),
            guard.compiled_packages.len()
        );
        out
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn snapshot(&self) -> RelmatchResult<Box<dyn RecordSnapshot>> {
        let records = Arc::clone(&*self.records.read().await);
        Ok(Box::new(RecordsSnapshot::new(records)))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
