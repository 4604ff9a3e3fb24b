//! Status output for the CLI
//!
//! Status lines go to stderr so stdout carries only command results
//! (fingerprint lists, keys, config).

mod output;

pub use output::{remark, step_info, step_ok_detail, step_warn_hint};
