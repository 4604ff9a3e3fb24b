//! Record store access for the matching engine
//!
//! Provides read-only lookups over release versions, packages and compiled
//! packages:
//! - `FileStore`: records document written by the upload pipeline
//! - `MemoryStore`: in-process records, used when embedding and in tests

mod factory;
pub mod file;
mod lookup;
pub mod memory;
pub mod records;

pub use factory::create_store;
pub use file::FileStore;
pub use lookup::{RecordSnapshot, RecordStore, RecordsSnapshot};
pub use memory::MemoryStore;
pub use records::{CompiledPackage, Package, PackageId, ReleaseVersion, Records, TargetImage};
