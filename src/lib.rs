//! relmatch - Package provenance matching for release uploads
//!
//! Decides which packages of a release upload already have an equivalent
//! stored artifact: source packages by fingerprint, compiled packages by
//! fingerprint, target image and dependency closure.

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod matching;
pub mod store;
pub mod ui;

pub use error::{RelmatchError, RelmatchResult};
pub use matching::Matcher;
