//! CLI command implementations

pub mod config;
pub mod dependency_key;
pub mod matches;

pub use config::execute as config;
pub use dependency_key::execute as dependency_key;
pub use matches::{compiled as match_compiled, open_store, source as match_source};
