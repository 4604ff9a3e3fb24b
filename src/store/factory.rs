//! Store factory for creating the configured record store backend

use crate::config::schema::{StoreBackend, StoreConfig};
use crate::error::{RelmatchError, RelmatchResult};
use crate::store::file::FileStore;
use crate::store::lookup::RecordStore;
use crate::store::memory::MemoryStore;

/// Create the record store selected by `config`
///
/// # Returns
/// * `Ok(Box<dyn RecordStore>)` - A boxed store implementation
/// * `Err` - If the file backend has no document path
pub fn create_store(config: &StoreConfig) -> RelmatchResult<Box<dyn RecordStore>> {
    match config.backend {
        StoreBackend::File => {
            let path = config.path.clone().ok_or_else(|| {
                RelmatchError::store_unavailable("file", "no records document configured")
            })?;
            Ok(Box::new(FileStore::new(path)))
        }
        StoreBackend::Memory => Ok(Box::new(MemoryStore::default())),
    }
}
